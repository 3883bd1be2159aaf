// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waiting for a pending render to finish.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use core::time::Duration;

use understory_frame::Deadline;

use crate::error::UpdateError;

#[derive(Default)]
struct Slot {
    result: Option<Result<(), UpdateError>>,
    waker: Option<Waker>,
}

impl Slot {
    fn settle(&mut self, result: Result<(), UpdateError>) {
        if self.result.is_none() {
            self.result = Some(result);
            if let Some(waker) = self.waker.take() {
                waker.wake();
            }
        }
    }
}

/// Resolves once the element has no render pending.
///
/// Returned by [`Element::update_complete`](crate::Element::update_complete).
/// Settles with `Ok(())` after the next update runs, with
/// [`UpdateError::Disconnected`] if the element is disconnected first, or with
/// [`UpdateError::Timeout`] once host time passes the element's update
/// timeout.
///
/// It can be awaited on any single-threaded executor, or polled without one
/// through [`try_take`](Self::try_take).
pub struct UpdateComplete {
    slot: Rc<RefCell<Slot>>,
}

impl UpdateComplete {
    pub(crate) fn ready(result: Result<(), UpdateError>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                result: Some(result),
                waker: None,
            })),
        }
    }

    /// Returns `true` once the wait has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slot.borrow().result.is_some()
    }

    /// Takes the result if the wait has settled.
    ///
    /// Returns `None` while pending and after the result was taken.
    pub fn try_take(&mut self) -> Option<Result<(), UpdateError>> {
        self.slot.borrow_mut().result.take()
    }
}

impl Future for UpdateComplete {
    type Output = Result<(), UpdateError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        match slot.result.take() {
            Some(result) => Poll::Ready(result),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

impl fmt::Debug for UpdateComplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateComplete")
            .field("result", &self.slot.borrow().result)
            .finish_non_exhaustive()
    }
}

/// Outstanding [`UpdateComplete`] waits of one element.
#[derive(Default)]
pub(crate) struct Waiters {
    entries: Vec<(Deadline, Rc<RefCell<Slot>>)>,
}

impl Waiters {
    pub(crate) fn wait(&mut self, now: Duration, timeout: Duration) -> UpdateComplete {
        let slot = Rc::new(RefCell::new(Slot::default()));
        self.entries
            .push((Deadline::after(now, timeout), Rc::clone(&slot)));
        UpdateComplete { slot }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn resolve_all(&mut self) {
        self.settle_all(Ok(()));
    }

    pub(crate) fn reject_all(&mut self, error: UpdateError) {
        self.settle_all(Err(error));
    }

    fn settle_all(&mut self, result: Result<(), UpdateError>) {
        for (_, slot) in self.entries.drain(..) {
            slot.borrow_mut().settle(result);
        }
    }

    /// Times out every wait whose deadline has passed, and forgets waits
    /// nobody holds anymore. Returns the number timed out.
    pub(crate) fn expire(&mut self, now: Duration) -> usize {
        let mut expired = 0;
        self.entries.retain(|(deadline, slot)| {
            if Rc::strong_count(slot) == 1 {
                false
            } else if deadline.is_expired(now) {
                slot.borrow_mut().settle(Err(UpdateError::Timeout));
                expired += 1;
                false
            } else {
                true
            }
        });
        expired
    }
}

impl fmt::Debug for Waiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waiters")
            .field("len", &self.entries.len())
            .finish()
    }
}
