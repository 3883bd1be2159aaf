// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property identification.

use core::fmt;

/// Identifies a declared property within one [`Schema`](crate::Schema).
///
/// Ids are dense indices assigned in declaration order by
/// [`Schema::normalize`](crate::Schema::normalize), so per-element storage can
/// be a plain vector. An id is only meaningful together with the schema that
/// issued it.
///
/// # Example
///
/// ```rust
/// use understory_element::PropertyId;
///
/// let id = PropertyId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u16);

impl PropertyId {
    /// Creates a property id from its index.
    ///
    /// This is typically called by [`Schema::normalize`](crate::Schema::normalize)
    /// rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the index of this property id.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyId").field(&self.0).finish()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_id_basics() {
        let id = PropertyId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.slot(), 42);
        assert_eq!(id, PropertyId::new(42));
        assert_ne!(id, PropertyId::new(43));
    }

    #[test]
    fn property_id_formatting() {
        let id = PropertyId::new(7);
        assert_eq!(format!("{id:?}"), "PropertyId(7)");
        assert_eq!(format!("{id}"), "PropertyId(7)");
    }
}
