// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use hashbrown::HashMap;

use crate::error::IconError;
use crate::fetch::{FetchId, IconFetcher};
use crate::svg::{Icon, root_element};

/// Maps an icon name to the location it is fetched from.
pub type Resolver = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Rewrites fetched SVG markup before it is cached.
pub type Mutator = Arc<dyn Fn(String) -> String + Send + Sync>;

/// The answer to [`IconLibrary::request`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconRequest {
    /// The icon (or its placeholder) is cached.
    Ready(Icon),
    /// A fetch is in flight; wait for [`IconLibrary::complete`].
    Pending,
}

/// The outcome of [`IconLibrary::complete`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    /// The icon now cached under the name; the placeholder if loading failed.
    pub icon: Icon,
    /// How many requests were answered with [`IconRequest::Pending`] while the
    /// fetch was in flight, the first one included.
    pub waiters: usize,
}

#[derive(Debug)]
struct InFlight {
    id: FetchId,
    locator: String,
    waiters: usize,
}

/// A named set of SVG icons loaded on demand.
///
/// Icons are requested by name. The resolver turns the name into a locator,
/// an [`IconFetcher`] retrieves it, and the host reports the fetched document
/// back with [`complete`](Self::complete) under the fetch's [`FetchId`]. Each
/// name has at most one fetch in flight, and the result, valid or not, is cached: a failed fetch or a
/// document whose root element is not `<svg>` caches the placeholder.
///
/// # Example
///
/// ```rust
/// use understory_icon::{FetchQueue, IconLibrary, IconRequest};
///
/// let mut library = IconLibrary::new("default", |name| format!("/icons/{name}.svg"));
/// let mut fetches = FetchQueue::new();
///
/// assert_eq!(library.request("home", &mut fetches), IconRequest::Pending);
/// assert_eq!(library.request("home", &mut fetches), IconRequest::Pending);
/// assert_eq!(fetches.len(), 1);
///
/// for fetch in fetches.drain() {
///     let done = library
///         .complete(&fetch.name, fetch.id, Ok(String::from("<svg><path d=\"M0 0\"/></svg>")))
///         .unwrap();
///     assert_eq!(done.waiters, 2);
/// }
/// assert!(matches!(library.request("home", &mut fetches), IconRequest::Ready(_)));
/// ```
pub struct IconLibrary {
    name: String,
    resolver: Resolver,
    mutator: Option<Mutator>,
    cache: HashMap<String, Icon>,
    in_flight: HashMap<String, InFlight>,
    last_fetch: u64,
}

impl IconLibrary {
    /// Creates a library with a resolver.
    pub fn new(
        name: impl Into<String>,
        resolver: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            resolver: Arc::new(resolver),
            mutator: None,
            cache: HashMap::new(),
            in_flight: HashMap::new(),
            last_fetch: 0,
        }
    }

    /// Sets a function that rewrites each fetched SVG before it is cached.
    #[must_use]
    pub fn with_mutator(
        mut self,
        mutator: impl Fn(String) -> String + Send + Sync + 'static,
    ) -> Self {
        self.mutator = Some(Arc::new(mutator));
        self
    }

    /// Returns the library name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where icon `name` is fetched from.
    #[must_use]
    pub fn resolve(&self, name: &str) -> String {
        (self.resolver)(name)
    }

    /// Requests icon `name`.
    ///
    /// Returns the cached icon if there is one. Otherwise starts a fetch
    /// through `fetcher`, unless one is already in flight for `name`, and
    /// returns [`IconRequest::Pending`].
    pub fn request<F: IconFetcher + ?Sized>(&mut self, name: &str, fetcher: &mut F) -> IconRequest {
        if let Some(icon) = self.cache.get(name) {
            return IconRequest::Ready(icon.clone());
        }
        if let Some(flight) = self.in_flight.get_mut(name) {
            flight.waiters += 1;
            log::trace!("{}: `{name}` already loading", self.name);
            return IconRequest::Pending;
        }
        let locator = self.resolve(name);
        self.last_fetch += 1;
        let id = FetchId::from_raw(self.last_fetch);
        log::debug!("{}: fetching `{name}` from `{locator}` as {id:?}", self.name);
        fetcher.fetch(id, &self.name, name, &locator);
        self.in_flight.insert(
            name.into(),
            InFlight {
                id,
                locator,
                waiters: 1,
            },
        );
        IconRequest::Pending
    }

    /// Reports the outcome of fetch `id`, started for `name`.
    ///
    /// A successful document is checked for an `<svg>` root, passed through
    /// the mutator and cached. Any failure is logged and caches the
    /// placeholder. Returns `None` if `id` is not the fetch in flight for
    /// `name`, for example because the cache was cleared meanwhile and the
    /// icon requested again; the result is then dropped.
    pub fn complete(
        &mut self,
        name: &str,
        id: FetchId,
        result: Result<String, IconError>,
    ) -> Option<Completion> {
        if self.in_flight.get(name).is_none_or(|flight| flight.id != id) {
            log::debug!("{}: dropping stale result {id:?} for `{name}`", self.name);
            return None;
        }
        let flight = self.in_flight.remove(name)?;
        let icon = match result.and_then(|document| self.accept(&flight.locator, document)) {
            Ok(icon) => icon,
            Err(err) => {
                log::error!("{}: failed to load icon `{name}`: {err}", self.name);
                Icon::placeholder()
            }
        };
        self.cache.insert(name.into(), icon.clone());
        Some(Completion {
            icon,
            waiters: flight.waiters,
        })
    }

    fn accept(&self, locator: &str, document: String) -> Result<Icon, IconError> {
        match root_element(&document) {
            Some("svg") => {}
            root => {
                return Err(IconError::NotSvg {
                    locator: locator.into(),
                    root: root.map(String::from),
                });
            }
        }
        let document = match &self.mutator {
            Some(mutator) => mutator(document),
            None => document,
        };
        Ok(Icon::svg(document))
    }

    /// Returns the cached icon for `name`.
    #[must_use]
    pub fn cached(&self, name: &str) -> Option<&Icon> {
        self.cache.get(name)
    }

    /// Returns `true` while a fetch for `name` is in flight.
    #[must_use]
    pub fn is_loading(&self, name: &str) -> bool {
        self.in_flight.contains_key(name)
    }

    /// Returns the number of cached icons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Forgets every cached icon and in-flight fetch.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.in_flight.clear();
    }

    /// Forgets one icon. Returns `true` if anything was removed.
    pub fn remove_from_cache(&mut self, name: &str) -> bool {
        let cached = self.cache.remove(name).is_some();
        let loading = self.in_flight.remove(name).is_some();
        cached || loading
    }
}

// Manual Debug impl since callbacks aren't Debug
impl fmt::Debug for IconLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconLibrary")
            .field("name", &self.name)
            .field("resolver", &"<fn>")
            .field("mutator", &self.mutator.as_ref().map(|_| "<fn>"))
            .field("cache", &self.cache.len())
            .field("in_flight", &self.in_flight)
            .field("last_fetch", &self.last_fetch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    use crate::fetch::FetchQueue;

    const HOME: &str = r#"<svg viewBox="0 0 24 24"><path d="M0 0"/></svg>"#;

    fn library() -> IconLibrary {
        IconLibrary::new("test", |name| format!("/icons/{name}.svg"))
    }

    /// Requests `name` and returns the id of the fetch it started.
    fn start(library: &mut IconLibrary, name: &str) -> FetchId {
        let mut fetches = FetchQueue::new();
        assert_eq!(library.request(name, &mut fetches), IconRequest::Pending);
        let fetch = fetches.drain().next().unwrap();
        assert_eq!(fetch.name, name);
        fetch.id
    }

    #[test]
    fn one_fetch_per_name() {
        let mut library = library();
        let mut fetches = FetchQueue::new();
        library.request("home", &mut fetches);
        library.request("home", &mut fetches);
        library.request("gear", &mut fetches);

        let started: Vec<_> = fetches.drain().map(|f| (f.id.raw(), f.locator)).collect();
        assert_eq!(
            started,
            [
                (1, String::from("/icons/home.svg")),
                (2, String::from("/icons/gear.svg"))
            ]
        );
        assert!(library.is_loading("home"));
    }

    #[test]
    fn success_is_cached() {
        let mut library = library();
        let id = start(&mut library, "home");

        let done = library.complete("home", id, Ok(HOME.into())).unwrap();
        assert_eq!(done.icon.markup(), HOME);
        assert_eq!(done.waiters, 1);
        assert!(!library.is_loading("home"));

        let mut fetches = FetchQueue::new();
        assert_eq!(
            library.request("home", &mut fetches),
            IconRequest::Ready(done.icon)
        );
        assert!(fetches.is_empty());
    }

    #[test]
    fn failures_cache_the_placeholder() {
        let mut library = library();
        let a = start(&mut library, "a");
        let b = start(&mut library, "b");

        let a = library
            .complete("a", a, Err(IconError::fetch("/icons/a.svg", "offline")))
            .unwrap();
        assert!(a.icon.is_placeholder());

        let b = library.complete("b", b, Ok("<html></html>".into())).unwrap();
        assert!(b.icon.is_placeholder());
        assert!(library.cached("b").is_some_and(Icon::is_placeholder));
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn mutator_rewrites_documents() {
        let mut library = library().with_mutator(|svg| svg.replace("<svg", "<svg class=\"icon\""));
        let id = start(&mut library, "home");
        let done = library.complete("home", id, Ok(HOME.into())).unwrap();
        assert!(done.icon.markup().starts_with("<svg class=\"icon\" viewBox"));
    }

    #[test]
    fn stale_completions_are_dropped() {
        let mut library = library();
        assert!(library
            .complete("home", FetchId::from_raw(1), Ok(HOME.into()))
            .is_none());

        let id = start(&mut library, "home");
        library.clear_cache();
        assert!(library.complete("home", id, Ok(HOME.into())).is_none());
        assert!(library.is_empty());
    }

    #[test]
    fn abandoned_fetch_does_not_answer_a_new_one() {
        let mut library = library();
        let first = start(&mut library, "home");
        library.clear_cache();
        let second = start(&mut library, "home");
        assert_ne!(first, second);

        assert!(library
            .complete("home", first, Err(IconError::fetch("/icons/home.svg", "offline")))
            .is_none());
        assert!(library.is_loading("home"));
        assert!(library.cached("home").is_none());

        let done = library.complete("home", second, Ok(HOME.into())).unwrap();
        assert!(!done.icon.is_placeholder());
    }

    #[test]
    fn remove_from_cache_refetches() {
        let mut library = library();
        let id = start(&mut library, "home");
        library.complete("home", id, Ok(HOME.into()));
        assert!(library.remove_from_cache("home"));
        assert!(!library.remove_from_cache("home"));

        let mut fetches = FetchQueue::new();
        assert_eq!(library.request("home", &mut fetches), IconRequest::Pending);
        assert_eq!(fetches.len(), 1);
    }
}
