// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

/// Identifies one fetch started by an [`IconLibrary`](crate::IconLibrary).
///
/// Ids are never reused by the same library, so the outcome of a fetch that
/// was abandoned (for example by clearing the cache) cannot be mistaken for
/// the outcome of a later fetch of the same icon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchId(u64);

impl FetchId {
    /// Creates an id from its raw serial number.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw serial number.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Starts icon fetches on behalf of an [`IconLibrary`](crate::IconLibrary).
///
/// A fetch is fire-and-forget: the host performs it however it likes (a
/// network request, a file read, a lookup in bundled assets) and reports the
/// outcome with [`IconLibrary::complete`](crate::IconLibrary::complete),
/// passing back the fetch's id.
pub trait IconFetcher {
    /// Starts fetching `locator`, the resolved location of icon `name` in
    /// `library`.
    fn fetch(&mut self, id: FetchId, library: &str, name: &str, locator: &str);
}

impl<T: IconFetcher + ?Sized> IconFetcher for &mut T {
    #[inline]
    fn fetch(&mut self, id: FetchId, library: &str, name: &str, locator: &str) {
        (**self).fetch(id, library, name, locator);
    }
}

/// One fetch started through a [`FetchQueue`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// Id to report the outcome under.
    pub id: FetchId,
    /// Library that asked for the icon.
    pub library: String,
    /// Icon name within the library.
    pub name: String,
    /// Resolved location.
    pub locator: String,
}

/// An [`IconFetcher`] that records fetches for the host to perform later.
#[derive(Clone, Debug, Default)]
pub struct FetchQueue {
    requests: Vec<FetchRequest>,
}

impl FetchQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of fetches waiting to be performed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if no fetch is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Takes all recorded fetches in request order.
    pub fn drain(&mut self) -> impl Iterator<Item = FetchRequest> + '_ {
        self.requests.drain(..)
    }
}

impl IconFetcher for FetchQueue {
    fn fetch(&mut self, id: FetchId, library: &str, name: &str, locator: &str) {
        self.requests.push(FetchRequest {
            id,
            library: library.into(),
            name: name.into(),
            locator: locator.into(),
        });
    }
}
