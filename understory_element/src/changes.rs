// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pending changes accumulated between renders.

use alloc::sync::Arc;

use smallvec::SmallVec;

use crate::id::PropertyId;
use crate::value::Value;

/// One property's change within a coalescing window.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    /// The value before the first write of the window.
    pub old: Value,
    /// The value after the latest write of the window.
    pub new: Value,
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    id: PropertyId,
    name: Arc<str>,
    change: Change,
}

/// An ordered set of property changes, at most one entry per property.
///
/// The element records every render-triggering change here and hands the
/// whole set to the update hooks when the render runs. Recording a property
/// that is already present keeps its original `old` and replaces `new`, so a
/// hook always sees the value from before the window opened.
///
/// # Example
///
/// ```rust
/// use understory_element::{ChangeSet, PropertyId, Value};
///
/// let mut changes = ChangeSet::new();
/// let value = PropertyId::new(0);
/// changes.record(value, "value".into(), Value::Number(1.0), Value::Number(2.0));
/// changes.record(value, "value".into(), Value::Number(2.0), Value::Number(3.0));
///
/// let change = changes.get("value").unwrap();
/// assert_eq!(change.old, Value::Number(1.0));
/// assert_eq!(change.new, Value::Number(3.0));
/// assert_eq!(changes.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    entries: SmallVec<[Entry; 4]>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change, keeping the first `old` if the property is present.
    pub fn record(&mut self, id: PropertyId, name: Arc<str>, old: Value, new: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.change.new = new;
        } else {
            self.entries.push(Entry {
                id,
                name,
                change: Change { old, new },
            });
        }
    }

    /// Returns the change for a property name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Change> {
        self.entries
            .iter()
            .find(|e| &*e.name == name)
            .map(|e| &e.change)
    }

    /// Returns the change for a property id.
    #[must_use]
    pub fn get_id(&self, id: PropertyId) -> Option<&Change> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.change)
    }

    /// Returns `true` if the property changed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of changed properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, change)` in first-write order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Change)> + '_ {
        self.entries.iter().map(|e| (&*e.name, &e.change))
    }

    /// Iterates over the ids of changed properties in first-write order.
    pub fn ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Takes all entries, leaving the set empty.
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
