// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadlines in host time.

use core::time::Duration;

/// A point in host time after which a bounded wait gives up.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use understory_frame::Deadline;
///
/// let deadline = Deadline::after(Duration::from_millis(100), Duration::from_secs(5));
/// assert!(!deadline.is_expired(Duration::from_millis(5_099)));
/// assert!(deadline.is_expired(Duration::from_millis(5_100)));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    at: Duration,
}

impl Deadline {
    /// Creates a deadline at an absolute host time.
    #[must_use]
    pub const fn at(at: Duration) -> Self {
        Self { at }
    }

    /// Creates a deadline `timeout` after `now`, saturating on overflow.
    #[must_use]
    pub fn after(now: Duration, timeout: Duration) -> Self {
        Self {
            at: now.saturating_add(timeout),
        }
    }

    /// Returns the absolute host time of this deadline.
    #[must_use]
    pub const fn instant(self) -> Duration {
        self.at
    }

    /// Returns `true` once `now` has reached the deadline.
    #[must_use]
    pub fn is_expired(self, now: Duration) -> bool {
        now >= self.at
    }

    /// Returns the time left before the deadline, or zero if it has passed.
    #[must_use]
    pub fn remaining(self, now: Duration) -> Duration {
        self.at.saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_inclusive() {
        let deadline = Deadline::at(Duration::from_millis(10));
        assert!(!deadline.is_expired(Duration::from_millis(9)));
        assert!(deadline.is_expired(Duration::from_millis(10)));
    }

    #[test]
    fn remaining_saturates() {
        let deadline = Deadline::after(Duration::from_millis(5), Duration::from_millis(10));
        assert_eq!(deadline.instant(), Duration::from_millis(15));
        assert_eq!(
            deadline.remaining(Duration::from_millis(7)),
            Duration::from_millis(8)
        );
        assert_eq!(deadline.remaining(Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn after_saturates_on_overflow() {
        let deadline = Deadline::after(Duration::MAX, Duration::from_secs(1));
        assert_eq!(deadline.instant(), Duration::MAX);
    }
}
