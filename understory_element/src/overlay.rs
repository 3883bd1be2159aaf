// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-element `:host {}` rule holding CSS custom properties.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

/// A single mutable `:host` rule.
///
/// Every property declared with `css_var` writes its value here as
/// `--<attribute>: <value>`. The overlay is adopted after the widget's shared
/// style sheets, so it can override their defaults.
///
/// # Example
///
/// ```rust
/// use understory_element::StyleOverlay;
///
/// let mut overlay = StyleOverlay::new();
/// assert_eq!(overlay.css_text(), ":host {}");
///
/// overlay.set("--size", "24");
/// assert_eq!(overlay.css_text(), ":host { --size: 24; }");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleOverlay {
    declarations: Vec<(String, String)>,
    revision: u64,
}

impl StyleOverlay {
    /// Creates an empty `:host {}` rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a custom property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets a custom property. Returns `true` if the rule changed.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.declarations.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) if *existing == value => false,
            Some((_, existing)) => {
                *existing = value;
                self.revision = self.revision.wrapping_add(1);
                true
            }
            None => {
                self.declarations.push((name.into(), value));
                self.revision = self.revision.wrapping_add(1);
                true
            }
        }
    }

    /// Removes a custom property. Returns `true` if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(i) = self.declarations.iter().position(|(n, _)| n == name) else {
            return false;
        };
        self.declarations.remove(i);
        self.revision = self.revision.wrapping_add(1);
        true
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if the rule is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates over `(name, value)` declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.declarations
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the revision counter, bumped on every effective change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Serializes the rule.
    #[must_use]
    pub fn css_text(&self) -> String {
        if self.declarations.is_empty() {
            return String::from(":host {}");
        }
        let mut css = String::from(":host {");
        for (name, value) in &self.declarations {
            let _ = write!(css, " {name}: {value};");
        }
        css.push_str(" }");
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_remove() {
        let mut overlay = StyleOverlay::new();
        assert!(overlay.set("--size", "24"));
        assert!(!overlay.set("--size", "24"));
        assert!(overlay.set("--color", "red"));
        assert_eq!(overlay.get("--size"), Some("24"));
        assert_eq!(overlay.css_text(), ":host { --size: 24; --color: red; }");

        assert!(overlay.remove("--size"));
        assert!(!overlay.remove("--size"));
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.revision(), 3);
    }

    #[test]
    fn empty_rule() {
        let overlay = StyleOverlay::new();
        assert!(overlay.is_empty());
        assert_eq!(overlay.iter().count(), 0);
        assert_eq!(overlay.css_text(), ":host {}");
    }
}
