// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-widget-type caches and tag definitions.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;

use hashbrown::HashMap;

use crate::coerce::NumberFallback;
use crate::error::DefineError;
use crate::schema::Schema;
use crate::widget::Widget;

struct WidgetEntry {
    type_name: &'static str,
    schema: Arc<Schema>,
    styles: Arc<[String]>,
    tag: Option<String>,
}

/// Caches normalized schemas and shared styles per widget type, and maps tag
/// names to widget types.
///
/// The registry is an explicit service: pass it to
/// [`Element::new`](crate::Element::new). Each widget type's declarations are
/// normalized once, on first use, and every element of that type shares the
/// resulting [`Schema`].
///
/// # Example
///
/// ```rust
/// use understory_element::{ElementRegistry, Node, PropertyDeclaration, Props, RenderError, Widget};
///
/// struct BuiRange;
///
/// impl Widget for BuiRange {
///     fn properties() -> Vec<PropertyDeclaration> {
///         vec![PropertyDeclaration::number("value")]
///     }
///
///     fn render(&self, _props: &Props<'_>) -> Result<Node, RenderError> {
///         Ok(Node::empty())
///     }
/// }
///
/// let mut registry = ElementRegistry::new();
/// assert_eq!(registry.define::<BuiRange>("").unwrap(), "bui-range");
/// assert_eq!(registry.tag_of::<BuiRange>(), Some("bui-range"));
/// assert_eq!(registry.schema::<BuiRange>().len(), 1);
/// ```
#[derive(Default)]
pub struct ElementRegistry {
    number_fallback: NumberFallback,
    widgets: HashMap<TypeId, WidgetEntry>,
    tags: HashMap<String, TypeId>,
}

impl ElementRegistry {
    /// Creates an empty registry with the default number fallback (`0`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the invalid-number policy for schemas normalized from now on.
    #[must_use]
    pub fn with_number_fallback(mut self, fallback: NumberFallback) -> Self {
        self.number_fallback = fallback;
        self
    }

    /// Returns the registry-wide invalid-number policy.
    #[must_use]
    pub fn number_fallback(&self) -> NumberFallback {
        self.number_fallback
    }

    fn entry<W: Widget>(&mut self) -> &mut WidgetEntry {
        let fallback = self.number_fallback;
        self.widgets.entry(TypeId::of::<W>()).or_insert_with(|| {
            let schema = Schema::normalize(W::properties(), fallback);
            log::debug!(
                "normalized `{}`: {} properties, {} observed attributes",
                type_name::<W>(),
                schema.len(),
                schema.observed_attributes().len()
            );
            WidgetEntry {
                type_name: type_name::<W>(),
                schema: Arc::new(schema),
                styles: Arc::from(W::styles()),
                tag: None,
            }
        })
    }

    /// Returns the normalized schema of `W`, normalizing it on first use.
    pub fn schema<W: Widget>(&mut self) -> Arc<Schema> {
        Arc::clone(&self.entry::<W>().schema)
    }

    /// Returns the shared style sheets of `W`, collecting them on first use.
    pub fn styles<W: Widget>(&mut self) -> Arc<[String]> {
        Arc::clone(&self.entry::<W>().styles)
    }

    /// Defines `W` under a tag name and returns the tag.
    ///
    /// An empty `tag` is derived from the type name (`BuiRange` becomes
    /// `bui-range`). Defining the same type under the same tag again only logs
    /// a warning.
    ///
    /// # Errors
    ///
    /// - [`DefineError::InvalidTagName`] unless the tag is lowercase, starts
    ///   with a letter and contains a hyphen.
    /// - [`DefineError::TagInUse`] if another type already has the tag.
    /// - [`DefineError::TypeAlreadyDefined`] if `W` has another tag.
    pub fn define<W: Widget>(&mut self, tag: &str) -> Result<String, DefineError> {
        let tag = if tag.is_empty() {
            kebab_case(short_type_name(type_name::<W>()))
        } else {
            String::from(tag)
        };
        if !is_valid_tag(&tag) {
            return Err(DefineError::InvalidTagName(tag));
        }

        let id = TypeId::of::<W>();
        if let Some(&owner) = self.tags.get(tag.as_str()) {
            if owner == id {
                log::warn!("`{tag}` is already defined");
                return Ok(tag);
            }
            let existing = self.widgets.get(&owner).map_or("?", |e| e.type_name);
            return Err(DefineError::TagInUse { tag, existing });
        }

        let entry = self.entry::<W>();
        if let Some(existing) = &entry.tag {
            return Err(DefineError::TypeAlreadyDefined {
                type_name: entry.type_name,
                tag: existing.clone(),
            });
        }
        entry.tag = Some(tag.clone());
        self.tags.insert(tag.clone(), id);
        log::debug!("defined `{tag}` as `{}`", type_name::<W>());
        Ok(tag)
    }

    /// Returns the tag `W` is defined under.
    #[must_use]
    pub fn tag_of<W: Widget>(&self) -> Option<&str> {
        self.widgets
            .get(&TypeId::of::<W>())
            .and_then(|e| e.tag.as_deref())
    }

    /// Returns the widget type defined under a tag.
    #[must_use]
    pub fn lookup(&self, tag: &str) -> Option<TypeId> {
        self.tags.get(tag).copied()
    }

    /// Returns `true` if a widget type is defined under `tag`.
    #[must_use]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Iterates over defined tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.keys().map(String::as_str)
    }
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("number_fallback", &self.number_fallback)
            .field(
                "widgets",
                &self.widgets.values().map(|e| e.type_name).collect::<Vec<_>>(),
            )
            .field("tags", &self.tags.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// `my_crate::widgets::BuiRange<T>` → `BuiRange`.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// `BuiRange` → `bui-range`.
fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.push(c.to_ascii_lowercase());
    }
    out
}

fn is_valid_tag(tag: &str) -> bool {
    tag.starts_with(|c: char| c.is_ascii_lowercase())
        && tag.contains('-')
        && tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
}
