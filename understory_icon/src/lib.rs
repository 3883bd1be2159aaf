// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Icon: named SVG icon libraries.
//!
//! An [`IconLibrary`] maps icon names to locators with a resolver, fetches
//! each icon at most once at a time, and caches the result. A failed fetch,
//! or a document whose root is not `<svg>`, caches a placeholder graphic
//! instead so the icon is never retried in a loop.
//!
//! Fetching belongs to the host. A library hands locators to an
//! [`IconFetcher`] and the host reports each outcome back with
//! [`IconLibrary::complete`] under the fetch's [`FetchId`]; [`FetchQueue`]
//! is a ready-made fetcher that just records the requests.
//!
//! Libraries are collected in an [`IconRegistry`] that is passed to whoever
//! needs icons.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_icon::{FetchQueue, IconError, IconLibrary, IconRegistry, IconRequest};
//!
//! let mut registry = IconRegistry::new();
//! registry
//!     .register(IconLibrary::new("default", |name| format!("/icons/{name}.svg")))
//!     .unwrap();
//!
//! let mut fetches = FetchQueue::new();
//! let library = registry.get_mut("default").unwrap();
//! assert_eq!(library.request("missing", &mut fetches), IconRequest::Pending);
//!
//! for fetch in fetches.drain() {
//!     let status = IconError::Status { locator: fetch.locator, status: 404 };
//!     let done = library.complete(&fetch.name, fetch.id, Err(status)).unwrap();
//!     assert!(done.icon.is_placeholder());
//! }
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod error;
mod fetch;
mod library;
mod registry;
mod svg;

pub use error::IconError;
pub use fetch::{FetchId, FetchQueue, FetchRequest, IconFetcher};
pub use library::{Completion, IconLibrary, IconRequest, Mutator, Resolver};
pub use registry::IconRegistry;
pub use svg::{Icon, PLACEHOLDER_SVG};
