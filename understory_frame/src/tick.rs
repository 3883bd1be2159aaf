// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick handles and the [`TickSource`] trait.

use core::fmt;

/// Identifies one outstanding tick request.
///
/// Handles are issued by a [`TickSource`] and are never reused by the same
/// source, so a handle that fires late (after its owner already cancelled or
/// re-requested) can be recognized as stale by comparing it with the handle
/// the owner currently holds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Creates a handle from its raw serial number.
    ///
    /// This is typically called by [`TickSource`] implementations rather than
    /// directly.
    #[must_use]
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw serial number of this handle.
    #[must_use]
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TickHandle").field(&self.0).finish()
    }
}

/// A pluggable "next tick" primitive.
///
/// Implementations may be backed by a UI frame callback, a timer, or a manual
/// pump. The contract is small:
///
/// - [`request_tick`](Self::request_tick) arranges for the requester to be
///   called back once, on the next tick, with the returned handle.
/// - [`cancel_tick`](Self::cancel_tick) withdraws a request that has not fired
///   yet. Cancelling an unknown or already-fired handle is a no-op that
///   returns `false`.
///
/// How the callback reaches the requester is up to the host. With
/// [`FrameQueue`](crate::FrameQueue) the host drains due requests each frame
/// and routes them by key.
pub trait TickSource {
    /// Requests a callback on the next tick.
    fn request_tick(&mut self) -> TickHandle;

    /// Cancels a pending request.
    ///
    /// Returns `true` if the request was pending and is now withdrawn.
    fn cancel_tick(&mut self, handle: TickHandle) -> bool;
}

impl<T: TickSource + ?Sized> TickSource for &mut T {
    #[inline]
    fn request_tick(&mut self) -> TickHandle {
        (**self).request_tick()
    }

    #[inline]
    fn cancel_tick(&mut self, handle: TickHandle) -> bool {
        (**self).cancel_tick(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    struct Counter {
        next: u64,
        cancelled: u32,
    }

    impl TickSource for Counter {
        fn request_tick(&mut self) -> TickHandle {
            self.next += 1;
            TickHandle::from_raw(self.next)
        }

        fn cancel_tick(&mut self, _handle: TickHandle) -> bool {
            self.cancelled += 1;
            true
        }
    }

    fn request_through<S: TickSource>(mut source: S) -> TickHandle {
        source.request_tick()
    }

    #[test]
    fn handle_raw_round_trip() {
        let handle = TickHandle::from_raw(7);
        assert_eq!(handle.raw(), 7);
        assert_eq!(format!("{handle:?}"), "TickHandle(7)");
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut counter = Counter {
            next: 0,
            cancelled: 0,
        };
        let first = request_through(&mut counter);
        let second = request_through(&mut counter);
        assert_ne!(first, second);
        assert!((&mut counter).cancel_tick(first));
        assert_eq!(counter.cancelled, 1);
    }
}
