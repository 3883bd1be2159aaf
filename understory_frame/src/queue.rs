// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit frame queue: the manual-pump implementation of [`TickSource`].

use alloc::vec::Vec;
use core::time::Duration;

use crate::tick::{TickHandle, TickSource};

/// A tick request waiting in a [`FrameQueue`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickRequest<K> {
    /// Handle returned to the requester.
    pub handle: TickHandle,
    /// Key identifying the requester, used by the host to route the callback.
    pub key: K,
}

/// An explicit queue of keyed tick requests.
///
/// `FrameQueue` is the simplest useful [`TickSource`] backend: requests are
/// recorded in order and handed back to the host by
/// [`begin_frame`](Self::begin_frame). Requests made while a frame is being
/// delivered land in the queue for the *next* frame, so a client that
/// re-requests from inside its own callback can never starve the host.
///
/// The queue has no notion of who the clients are. Each request carries a key
/// chosen by the host, and [`source`](Self::source) hands a client a
/// [`TickSource`] view bound to its key.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use understory_frame::{FrameQueue, TickSource};
///
/// let mut queue = FrameQueue::new();
/// let handle = queue.source("gauge").request_tick();
/// assert!(queue.is_pending(handle));
///
/// let frame = queue.begin_frame(Duration::from_millis(16));
/// assert_eq!(frame.number(), 1);
/// assert_eq!(frame.len(), 1);
/// assert!(!queue.is_pending(handle));
/// ```
#[derive(Clone, Debug)]
pub struct FrameQueue<K> {
    next_serial: u64,
    frame: u64,
    now: Duration,
    requests: Vec<TickRequest<K>>,
}

impl<K> Default for FrameQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FrameQueue<K> {
    /// Creates an empty queue at frame zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_serial: 0,
            frame: 0,
            now: Duration::ZERO,
            requests: Vec::new(),
        }
    }

    /// Records a tick request for `key` and returns its handle.
    pub fn request(&mut self, key: K) -> TickHandle {
        self.next_serial += 1;
        let handle = TickHandle::from_raw(self.next_serial);
        self.requests.push(TickRequest { handle, key });
        handle
    }

    /// Withdraws a pending request.
    ///
    /// Returns `true` if the request was pending.
    pub fn cancel(&mut self, handle: TickHandle) -> bool {
        match self.requests.iter().position(|r| r.handle == handle) {
            Some(index) => {
                self.requests.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `handle` is still waiting for a frame.
    #[must_use]
    pub fn is_pending(&self, handle: TickHandle) -> bool {
        self.requests.iter().any(|r| r.handle == handle)
    }

    /// Returns the number of pending requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if no requests are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Returns the number of the last frame begun (zero before the first).
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns the timestamp passed to the last [`begin_frame`](Self::begin_frame).
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Starts a new frame at host time `now`, taking every pending request.
    ///
    /// The host is expected to deliver each returned request to its owner.
    /// Owners must tolerate stale deliveries: a request taken here may belong
    /// to a client that was torn down by an earlier delivery in the same frame.
    pub fn begin_frame(&mut self, now: Duration) -> Frame<K> {
        self.frame += 1;
        self.now = now;
        Frame {
            number: self.frame,
            now,
            requests: core::mem::take(&mut self.requests),
        }
    }

    /// Returns a [`TickSource`] that files requests under `key`.
    pub fn source(&mut self, key: K) -> KeyedTicks<'_, K>
    where
        K: Clone,
    {
        KeyedTicks { queue: self, key }
    }
}

/// A [`TickSource`] view of a [`FrameQueue`] bound to one key.
#[derive(Debug)]
pub struct KeyedTicks<'a, K> {
    queue: &'a mut FrameQueue<K>,
    key: K,
}

impl<K: Clone> TickSource for KeyedTicks<'_, K> {
    fn request_tick(&mut self) -> TickHandle {
        self.queue.request(self.key.clone())
    }

    fn cancel_tick(&mut self, handle: TickHandle) -> bool {
        self.queue.cancel(handle)
    }
}

/// The requests due in one frame, as returned by [`FrameQueue::begin_frame`].
#[derive(Clone, Debug)]
pub struct Frame<K> {
    number: u64,
    now: Duration,
    requests: Vec<TickRequest<K>>,
}

impl<K> Frame<K> {
    /// Returns the frame number (starting at 1).
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Returns the host time at which this frame began.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns the number of due requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if nothing was due.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Iterates over the due requests in request order.
    pub fn iter(&self) -> impl Iterator<Item = &TickRequest<K>> {
        self.requests.iter()
    }
}

impl<K> IntoIterator for Frame<K> {
    type Item = TickRequest<K>;
    type IntoIter = alloc::vec::IntoIter<TickRequest<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn requests_are_delivered_in_order() {
        let mut queue = FrameQueue::new();
        let a = queue.request('a');
        let b = queue.request('b');
        let c = queue.request('a');

        let frame = queue.begin_frame(FRAME);
        let delivered: Vec<_> = frame.into_iter().map(|r| (r.handle, r.key)).collect();
        assert_eq!(delivered, vec![(a, 'a'), (b, 'b'), (c, 'a')]);
        assert!(queue.is_empty());
    }

    #[test]
    fn handles_are_never_reused() {
        let mut queue = FrameQueue::new();
        let first = queue.request(());
        let _ = queue.begin_frame(FRAME);
        let second = queue.request(());
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn cancel_only_removes_pending() {
        let mut queue = FrameQueue::new();
        let handle = queue.request(1_u32);
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert!(queue.begin_frame(FRAME).is_empty());
    }

    #[test]
    fn requests_during_delivery_wait_for_next_frame() {
        let mut queue = FrameQueue::new();
        queue.request(1_u32);

        let frame = queue.begin_frame(FRAME);
        for request in frame {
            // Re-request from inside the callback.
            queue.request(request.key);
        }
        assert_eq!(queue.len(), 1);

        let next = queue.begin_frame(FRAME * 2);
        assert_eq!(next.number(), 2);
        assert_eq!(next.now(), FRAME * 2);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn keyed_source_files_under_key() {
        let mut queue = FrameQueue::new();
        let handle = queue.source(9_u8).request_tick();
        assert!(queue.is_pending(handle));
        assert!(queue.source(0_u8).cancel_tick(handle));
        assert!(queue.is_empty());
    }

    #[test]
    fn frame_counter_and_clock() {
        let mut queue = FrameQueue::<()>::new();
        assert_eq!(queue.frame(), 0);
        assert_eq!(queue.now(), Duration::ZERO);
        let _ = queue.begin_frame(FRAME);
        assert_eq!(queue.frame(), 1);
        assert_eq!(queue.now(), FRAME);
    }
}
