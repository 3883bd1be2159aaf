// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Widget`] trait implemented by concrete widgets.

use alloc::string::String;
use alloc::vec::Vec;

use crate::changes::ChangeSet;
use crate::error::RenderError;
use crate::schema::PropertyDeclaration;
use crate::state::Props;
use crate::tree::Node;
use crate::value::Value;

/// A concrete widget: a property schema, a render function and optional
/// lifecycle hooks.
///
/// The [`Element`](crate::Element) owns the widget and all reactive state.
/// Hooks receive `&mut self` so a widget can keep private bookkeeping (cached
/// geometry, counters), but declared properties are only written through the
/// element.
///
/// The hook sequence for one update is
/// `before_update → render → after_update → first_updated (once)`.
///
/// # Example
///
/// ```rust
/// use understory_element::{Node, PropertyDeclaration, Props, RenderError, Widget};
///
/// struct Badge;
///
/// impl Widget for Badge {
///     fn properties() -> Vec<PropertyDeclaration> {
///         vec![PropertyDeclaration::string("label").reflect(true)]
///     }
///
///     fn render(&self, props: &Props<'_>) -> Result<Node, RenderError> {
///         let label = props.str("label").unwrap_or_default();
///         Ok(Node::element("span").text(label).into())
///     }
/// }
/// ```
pub trait Widget: 'static {
    /// Declares the widget's properties.
    ///
    /// Called once per widget type; the normalized schema is cached in the
    /// [`ElementRegistry`](crate::ElementRegistry).
    fn properties() -> Vec<PropertyDeclaration>
    where
        Self: Sized;

    /// Static style sheets shared by every instance of the widget type.
    fn styles() -> Vec<String>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Produces the tree for the current state.
    ///
    /// Errors and panics are caught by the element, which commits a fallback
    /// tree instead.
    fn render(&self, props: &Props<'_>) -> Result<Node, RenderError>;

    /// Runs before each render with the changes being flushed.
    fn before_update(&mut self, props: &Props<'_>, changes: &ChangeSet) {
        let _ = (props, changes);
    }

    /// Runs after each render, successful or not.
    fn after_update(&mut self, props: &Props<'_>, changes: &ChangeSet) {
        let _ = (props, changes);
    }

    /// Runs once, after the first successful render.
    fn first_updated(&mut self, props: &Props<'_>, changes: &ChangeSet) {
        let _ = (props, changes);
    }

    /// Runs synchronously on every property change, including changes to
    /// `no_render` properties.
    fn after_property_update(&mut self, name: &str, new: &Value, old: &Value) {
        let _ = (name, new, old);
    }

    /// Runs after the element is connected.
    fn on_mounted(&mut self) {}

    /// Runs after the element is disconnected.
    fn on_unmounted(&mut self) {}

    /// Runs after the element is adopted into another document.
    fn on_adopted(&mut self) {}
}
