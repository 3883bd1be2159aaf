// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element's attribute set.

use alloc::string::String;
use alloc::vec::Vec;

/// Ordered attribute storage with a revision counter.
///
/// Attributes are written by reflection and by external mutation through
/// [`Element::set_attribute`](crate::Element::set_attribute). The revision
/// bumps only when the stored text actually changes, so tests and hosts can
/// check "was anything written?" cheaply.
///
/// # Example
///
/// ```rust
/// use understory_element::AttributeMap;
///
/// let mut attrs = AttributeMap::new();
/// assert_eq!(attrs.set("label", "ok"), None);
/// assert_eq!(attrs.revision(), 1);
///
/// // Writing the same text again is not a change.
/// assert_eq!(attrs.set("label", "ok").as_deref(), Some("ok"));
/// assert_eq!(attrs.revision(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
    revision: u64,
}

impl AttributeMap {
    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    /// Returns `true` if the attribute is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Sets an attribute and returns its previous value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        match self.position(name) {
            Some(i) if self.entries[i].1 == value => Some(value),
            Some(i) => {
                self.bump_revision();
                Some(core::mem::replace(&mut self.entries[i].1, value))
            }
            None => {
                self.entries.push((name.into(), value));
                self.bump_revision();
                None
            }
        }
    }

    /// Removes an attribute and returns its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let i = self.position(name)?;
        self.bump_revision();
        Some(self.entries.remove(i).1)
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the revision counter.
    ///
    /// Bumped on every set or remove that changes the stored attributes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut attrs = AttributeMap::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        assert_eq!(attrs.get("a"), Some("1"));
        assert_eq!(attrs.set("a", "3").as_deref(), Some("1"));
        assert_eq!(attrs.get("a"), Some("3"));
        assert_eq!(attrs.remove("b").as_deref(), Some("2"));
        assert!(!attrs.contains("b"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn revision_bumps_only_on_change() {
        let mut attrs = AttributeMap::new();
        attrs.set("a", "1");
        attrs.set("a", "1");
        assert_eq!(attrs.revision(), 1);
        assert_eq!(attrs.remove("missing"), None);
        assert_eq!(attrs.revision(), 1);
        attrs.remove("a");
        assert_eq!(attrs.revision(), 2);
        assert!(attrs.is_empty());
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut attrs = AttributeMap::new();
        attrs.set("z", "");
        attrs.set("a", "x");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, [("z", ""), ("a", "x")]);
    }
}
