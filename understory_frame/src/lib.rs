// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Frame: host-agnostic next-tick primitives.
//!
//! UI runtimes defer work to "the next frame": a browser has
//! `requestAnimationFrame`, a native shell has a vsync callback, and a test
//! has whatever the test decides to pump. This crate abstracts that decision
//! so deferred work can be written once and driven by any of them.
//!
//! - [`TickSource`]: the pluggable "call me on the next tick" primitive.
//!   Requests return a [`TickHandle`] that can be cancelled.
//! - [`FrameQueue`]: an explicit task queue that implements the primitive for
//!   any number of keyed clients. The host calls [`FrameQueue::begin_frame`]
//!   once per frame and delivers each due request to its owner.
//! - [`Deadline`]: a point in host time used for bounded waits.
//!
//! Time is whatever the host says it is. Every API that needs "now" takes a
//! [`Duration`](core::time::Duration) measured from an origin the host picks
//! (for example the page's time origin, or zero in tests).
//!
//! ## Quick Start
//!
//! ```rust
//! use core::time::Duration;
//! use understory_frame::{FrameQueue, TickSource};
//!
//! let mut queue = FrameQueue::<u32>::new();
//!
//! // Two clients request a tick; the second cancels its request.
//! let a = queue.source(1).request_tick();
//! let b = queue.source(2).request_tick();
//! assert!(queue.cancel(b));
//!
//! // The host pumps one frame and delivers the due requests.
//! let frame = queue.begin_frame(Duration::from_millis(16));
//! let due: Vec<_> = frame.iter().map(|r| (r.handle, r.key)).collect();
//! assert_eq!(due, vec![(a, 1)]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod deadline;
mod queue;
mod tick;

pub use deadline::Deadline;
pub use queue::{Frame, FrameQueue, KeyedTicks, TickRequest};
pub use tick::{TickHandle, TickSource};
