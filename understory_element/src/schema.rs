// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property declarations and the normalized [`Schema`].
//!
//! A widget declares its properties tersely with [`PropertyDeclaration`];
//! [`Schema::normalize`] expands the declarations into complete
//! [`PropertyDescriptor`]s, repairing inconsistencies with a warning instead
//! of failing.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::coerce::{CoercionType, Converter, NumberFallback, Parser};
use crate::id::PropertyId;
use crate::value::Value;

bitflags::bitflags! {
    /// Behavior flags of a normalized property.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// Property writes are reflected into the attribute.
        const REFLECT   = 0b0000_0001;
        /// Property writes update the `--<attribute>` CSS custom property.
        const CSS_VAR   = 0b0000_0010;
        /// External attribute mutation is fed back into the property.
        const WATCHED   = 0b0000_0100;
        /// Changes never schedule a render.
        const NO_RENDER = 0b0000_1000;
    }
}

#[derive(Clone)]
enum DeclaredType {
    Type(CoercionType),
    Named(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum DeclaredAttribute {
    Derived,
    Named(String),
    Disabled,
}

/// A terse property declaration, as returned by
/// [`Widget::properties`](crate::Widget::properties).
///
/// Unset options take their defaults during normalization:
///
/// - type: `String`
/// - attribute: the property name
/// - `reflect`, `css_var`, `no_render`: `false`
/// - `watched`: `true` when the property has an attribute
///
/// # Example
///
/// ```rust
/// use understory_element::PropertyDeclaration;
///
/// let decls = [
///     PropertyDeclaration::number("value").default_value(0.0),
///     PropertyDeclaration::string("label").reflect(true),
///     PropertyDeclaration::number("size").css_var(true),
///     PropertyDeclaration::boolean("busy").no_attribute(),
/// ];
/// assert_eq!(decls[0].name(), "value");
/// ```
#[derive(Clone)]
pub struct PropertyDeclaration {
    name: String,
    ty: DeclaredType,
    attribute: DeclaredAttribute,
    reflect: bool,
    css_var: bool,
    watched: Option<bool>,
    no_render: bool,
    parser: Option<Parser>,
    converter: Option<Converter>,
    default: Option<Value>,
    number_fallback: Option<NumberFallback>,
}

impl PropertyDeclaration {
    /// Declares a `String` property.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: DeclaredType::Type(CoercionType::String),
            attribute: DeclaredAttribute::Derived,
            reflect: false,
            css_var: false,
            watched: None,
            no_render: false,
            parser: None,
            converter: None,
            default: None,
            number_fallback: None,
        }
    }

    /// Declares a `String` property.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// Declares a `Number` property.
    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name).ty(CoercionType::Number)
    }

    /// Declares a `Boolean` property.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name).ty(CoercionType::Boolean)
    }

    /// Declares a `NumberArray` property.
    #[must_use]
    pub fn number_array(name: impl Into<String>) -> Self {
        Self::new(name).ty(CoercionType::NumberArray)
    }

    /// Declares a `StringArray` property.
    #[must_use]
    pub fn string_array(name: impl Into<String>) -> Self {
        Self::new(name).ty(CoercionType::StringArray)
    }

    /// Declares an `Object` property.
    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name).ty(CoercionType::Object)
    }

    /// Declares a `Date` property.
    #[must_use]
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name).ty(CoercionType::Date)
    }

    /// Returns the declared property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the coercion type.
    #[must_use]
    pub fn ty(mut self, ty: CoercionType) -> Self {
        self.ty = DeclaredType::Type(ty);
        self
    }

    /// Sets the coercion type by name (`"Number"`, `"Boolean"`, ...).
    ///
    /// Unknown names normalize to [`CoercionType::Passthrough`] with a warning.
    #[must_use]
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.ty = DeclaredType::Named(name.into());
        self
    }

    /// Overrides the attribute name.
    #[must_use]
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = DeclaredAttribute::Named(attribute.into());
        self
    }

    /// Gives the property no attribute at all.
    ///
    /// Such a property is never observed, reflected or exposed as a CSS
    /// custom property.
    #[must_use]
    pub fn no_attribute(mut self) -> Self {
        self.attribute = DeclaredAttribute::Disabled;
        self
    }

    /// Sets whether property writes are reflected into the attribute.
    #[must_use]
    pub fn reflect(mut self, reflect: bool) -> Self {
        self.reflect = reflect;
        self
    }

    /// Sets whether property writes update the `--<attribute>` CSS variable.
    #[must_use]
    pub fn css_var(mut self, css_var: bool) -> Self {
        self.css_var = css_var;
        self
    }

    /// Sets whether attribute mutation is fed back into the property.
    #[must_use]
    pub fn watched(mut self, watched: bool) -> Self {
        self.watched = Some(watched);
        self
    }

    /// Sets whether changes skip rendering entirely.
    ///
    /// Changes to such a property still run
    /// [`after_property_update`](crate::Widget::after_property_update).
    #[must_use]
    pub fn no_render(mut self, no_render: bool) -> Self {
        self.no_render = no_render;
        self
    }

    /// Replaces the built-in parser of the coercion type.
    #[must_use]
    pub fn parser(mut self, parser: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Replaces the built-in converter of the coercion type.
    #[must_use]
    pub fn converter(
        mut self,
        converter: impl Fn(&Value) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Sets the value written through the pipeline at construction.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Overrides the schema-wide invalid-number policy for this property.
    #[must_use]
    pub fn number_fallback(mut self, fallback: NumberFallback) -> Self {
        self.number_fallback = Some(fallback);
        self
    }
}

// Manual Debug impl since callbacks aren't Debug
impl fmt::Debug for PropertyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = match &self.ty {
            DeclaredType::Type(ty) => ty.name(),
            DeclaredType::Named(name) => name.as_str(),
        };
        f.debug_struct("PropertyDeclaration")
            .field("name", &self.name)
            .field("type", &ty)
            .field("attribute", &self.attribute)
            .field("reflect", &self.reflect)
            .field("css_var", &self.css_var)
            .field("watched", &self.watched)
            .field("no_render", &self.no_render)
            .field("has_parser", &self.parser.is_some())
            .field("has_converter", &self.converter.is_some())
            .field("default", &self.default)
            .field("number_fallback", &self.number_fallback)
            .finish()
    }
}

/// A fully normalized property.
#[derive(Clone)]
pub struct PropertyDescriptor {
    id: PropertyId,
    name: Arc<str>,
    attribute: Option<Arc<str>>,
    css_var: Option<String>,
    coercion: CoercionType,
    parser: Option<Parser>,
    converter: Option<Converter>,
    flags: PropertyFlags,
    default: Option<Value>,
    number_fallback: NumberFallback,
}

impl PropertyDescriptor {
    /// Returns the id of this property within its schema.
    #[must_use]
    #[inline]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Returns the property name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    /// Returns the attribute name, or `None` if the property has no attribute.
    #[must_use]
    #[inline]
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Returns the CSS custom property name (`--<attribute>`), if enabled.
    #[must_use]
    #[inline]
    pub fn css_var_name(&self) -> Option<&str> {
        self.css_var.as_deref()
    }

    /// Returns the coercion type.
    #[must_use]
    #[inline]
    pub fn coercion(&self) -> &CoercionType {
        &self.coercion
    }

    /// Returns the behavior flags.
    #[must_use]
    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Returns whether property writes are reflected into the attribute.
    #[must_use]
    #[inline]
    pub fn reflects(&self) -> bool {
        self.flags.contains(PropertyFlags::REFLECT)
    }

    /// Returns whether the attribute is observed.
    #[must_use]
    #[inline]
    pub fn is_watched(&self) -> bool {
        self.flags.contains(PropertyFlags::WATCHED)
    }

    /// Returns whether changes schedule renders.
    #[must_use]
    #[inline]
    pub fn renders(&self) -> bool {
        !self.flags.contains(PropertyFlags::NO_RENDER)
    }

    /// Returns the declared default, if any.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the invalid-number policy used by the built-in number parser.
    #[must_use]
    #[inline]
    pub fn number_fallback(&self) -> NumberFallback {
        self.number_fallback
    }

    /// Coerces an incoming value with the declared or built-in parser.
    #[must_use]
    pub fn parse(&self, value: Value) -> Value {
        match &self.parser {
            Some(parser) => parser(value),
            None => self.coercion.parse(value, self.number_fallback),
        }
    }

    /// Converts a stored value to attribute text with the declared or
    /// built-in converter. `None` means "remove the attribute".
    #[must_use]
    pub fn convert(&self, value: &Value) -> Option<String> {
        match &self.converter {
            Some(converter) => converter(value),
            None => self.coercion.convert(value),
        }
    }
}

fn same_callback<T: ?Sized>(a: Option<&Arc<T>>, b: Option<&Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.attribute == other.attribute
            && self.coercion == other.coercion
            && self.flags == other.flags
            && self.default == other.default
            && self.number_fallback == other.number_fallback
            && same_callback(self.parser.as_ref(), other.parser.as_ref())
            && same_callback(self.converter.as_ref(), other.converter.as_ref())
    }
}

// Manual Debug impl since callbacks aren't Debug
impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("attribute", &self.attribute)
            .field("css_var", &self.css_var)
            .field("coercion", &self.coercion)
            .field("flags", &self.flags)
            .field("default", &self.default)
            .field("number_fallback", &self.number_fallback)
            .field("has_parser", &self.parser.is_some())
            .field("has_converter", &self.converter.is_some())
            .finish()
    }
}

/// The normalized property schema of one widget type.
///
/// Normalization is a pure function of the declarations: the same
/// declarations always produce equal schemas.
///
/// # Example
///
/// ```rust
/// use understory_element::{NumberFallback, PropertyDeclaration, Schema};
///
/// let schema = Schema::normalize(
///     [
///         PropertyDeclaration::number("value"),
///         PropertyDeclaration::string("label").reflect(true),
///         PropertyDeclaration::boolean("busy").no_attribute(),
///     ],
///     NumberFallback::default(),
/// );
///
/// let observed: Vec<_> = schema.observed_attributes().collect();
/// assert_eq!(observed, ["value", "label"]);
/// assert!(schema.by_attribute("busy").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    descriptors: Vec<PropertyDescriptor>,
    by_name: HashMap<Arc<str>, PropertyId>,
    by_attribute: HashMap<Arc<str>, PropertyId>,
    observed: Vec<Arc<str>>,
}

impl Schema {
    /// Expands declarations into a complete schema.
    ///
    /// `fallback` is the invalid-number policy for properties that do not set
    /// their own. Inconsistent declarations are repaired with a warning:
    ///
    /// - an unknown type name becomes [`CoercionType::Passthrough`];
    /// - an empty attribute name becomes the property name;
    /// - a property whose attribute is already taken loses its attribute;
    /// - `watched`, `reflect` and `css_var` are cleared when there is no
    ///   attribute;
    /// - a repeated or empty property name is skipped.
    #[must_use]
    pub fn normalize(
        declarations: impl IntoIterator<Item = PropertyDeclaration>,
        fallback: NumberFallback,
    ) -> Self {
        let mut schema = Self::default();
        for decl in declarations {
            if decl.name.is_empty() {
                log::warn!("skipping property declaration with an empty name");
                continue;
            }
            if schema.by_name.contains_key(decl.name.as_str()) {
                log::warn!("property `{}` declared twice, keeping the first", decl.name);
                continue;
            }
            if schema.descriptors.len() >= usize::from(u16::MAX) {
                log::warn!("too many properties, skipping `{}`", decl.name);
                continue;
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "len < u16::MAX checked above"
            )]
            let id = PropertyId::new(schema.descriptors.len() as u16);
            let descriptor = schema.describe(id, decl, fallback);
            schema.insert(descriptor);
        }
        schema
    }

    fn describe(
        &self,
        id: PropertyId,
        decl: PropertyDeclaration,
        fallback: NumberFallback,
    ) -> PropertyDescriptor {
        let PropertyDeclaration {
            name,
            ty,
            attribute,
            reflect,
            css_var,
            watched,
            no_render,
            parser,
            converter,
            default,
            number_fallback,
        } = decl;

        let coercion = match ty {
            DeclaredType::Type(ty) => ty,
            DeclaredType::Named(type_name) => CoercionType::from_name(&type_name)
                .unwrap_or_else(|| {
                    log::warn!("property `{name}`: unknown type `{type_name}`, values pass through");
                    CoercionType::Passthrough
                }),
        };

        let attribute = match attribute {
            DeclaredAttribute::Derived => Some(name.clone()),
            DeclaredAttribute::Named(attr) if attr.is_empty() => {
                log::warn!("property `{name}`: empty attribute name, using `{name}`");
                Some(name.clone())
            }
            DeclaredAttribute::Named(attr) => Some(attr),
            DeclaredAttribute::Disabled => None,
        };
        let attribute = attribute.and_then(|attr| {
            if let Some(owner) = self.by_attribute.get(attr.as_str()) {
                log::warn!(
                    "property `{name}`: attribute `{attr}` already belongs to `{}`, disabling it",
                    self.descriptors[owner.slot()].name
                );
                None
            } else {
                Some(attr)
            }
        });

        let mut flags = PropertyFlags::empty();
        flags.set(PropertyFlags::REFLECT, reflect);
        flags.set(PropertyFlags::CSS_VAR, css_var);
        flags.set(PropertyFlags::WATCHED, watched.unwrap_or(attribute.is_some()));
        flags.set(PropertyFlags::NO_RENDER, no_render);

        let attribute_flags = PropertyFlags::REFLECT | PropertyFlags::CSS_VAR | PropertyFlags::WATCHED;
        if attribute.is_none() && flags.intersects(attribute_flags) {
            log::warn!(
                "property `{name}` has no attribute, clearing {:?}",
                flags & attribute_flags
            );
            flags.remove(attribute_flags);
        }

        let css_var = flags
            .contains(PropertyFlags::CSS_VAR)
            .then(|| attribute.as_ref().map(|attr| format!("--{attr}")))
            .flatten();

        PropertyDescriptor {
            id,
            name: Arc::from(name),
            attribute: attribute.map(Arc::from),
            css_var,
            coercion,
            parser,
            converter,
            flags,
            default,
            number_fallback: number_fallback.unwrap_or(fallback),
        }
    }

    fn insert(&mut self, descriptor: PropertyDescriptor) {
        let id = descriptor.id;
        self.by_name.insert(descriptor.name.clone(), id);
        if let Some(attr) = &descriptor.attribute {
            self.by_attribute.insert(attr.clone(), id);
            if descriptor.is_watched() {
                self.observed.push(attr.clone());
            }
        }
        self.descriptors.push(descriptor);
    }

    /// Returns the number of properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if the schema declares no properties.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Returns the descriptor for an id.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&PropertyDescriptor> {
        self.descriptors.get(id.slot())
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<PropertyId> {
        self.by_name.get(name).copied()
    }

    /// Looks up the property owning an attribute, watched or not.
    #[must_use]
    pub fn by_attribute(&self, attribute: &str) -> Option<PropertyId> {
        self.by_attribute.get(attribute).copied()
    }

    /// Returns the descriptor for a property name.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.by_name(name).and_then(|id| self.get(id))
    }

    /// Returns the attribute names of watched properties, in declaration order.
    pub fn observed_attributes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.observed.iter().map(|attr| &**attr)
    }

    /// Returns `true` if external mutation of `attribute` reaches a property.
    #[must_use]
    pub fn is_observed(&self, attribute: &str) -> bool {
        self.by_attribute(attribute)
            .and_then(|id| self.get(id))
            .is_some_and(PropertyDescriptor::is_watched)
    }

    /// Iterates over all descriptors in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PropertyDescriptor> + '_ {
        self.descriptors.iter()
    }
}
