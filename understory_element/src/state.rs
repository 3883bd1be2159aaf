// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element property storage and the read-only [`Props`] view.

use alloc::vec::Vec;
use core::fmt;

use crate::id::PropertyId;
use crate::schema::Schema;
use crate::value::Value;

/// Current property values of one element, indexed by [`PropertyId`].
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct PropertyState {
    values: Vec<Value>,
}

impl PropertyState {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            values: vec![Value::Null; len],
        }
    }

    pub(crate) fn get(&self, id: PropertyId) -> Option<&Value> {
        self.values.get(id.slot())
    }

    /// Stores `value` and returns the previous value.
    pub(crate) fn replace(&mut self, id: PropertyId, value: Value) -> Option<Value> {
        self.values
            .get_mut(id.slot())
            .map(|slot| core::mem::replace(slot, value))
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.values
    }
}

/// A read-only view of an element's properties.
///
/// Passed to [`Widget::render`](crate::Widget::render) and the update hooks.
#[derive(Copy, Clone)]
pub struct Props<'a> {
    schema: &'a Schema,
    values: &'a [Value],
}

impl<'a> Props<'a> {
    pub(crate) fn new(schema: &'a Schema, state: &'a PropertyState) -> Self {
        Self {
            schema,
            values: state.values(),
        }
    }

    /// Returns the schema the values belong to.
    #[must_use]
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Returns the value of a property, or `None` if it is not declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.schema
            .by_name(name)
            .and_then(|id| self.values.get(id.slot()))
    }

    /// Returns the value of a property by id.
    #[must_use]
    pub fn get_id(&self, id: PropertyId) -> Option<&'a Value> {
        self.values.get(id.slot())
    }

    /// Returns a `Number` property.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    /// Returns a `String` property.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns a `Boolean` property.
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let (schema, values) = (self.schema, self.values);
        schema
            .iter()
            .zip(values)
            .map(|(descriptor, value)| (descriptor.name(), value))
    }
}

impl fmt::Debug for Props<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
