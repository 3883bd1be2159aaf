// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::error::IconError;
use crate::library::IconLibrary;

/// Icon libraries by name.
///
/// An explicit service: widgets that show icons are handed a registry (or a
/// library from it) rather than looking one up globally.
#[derive(Debug, Default)]
pub struct IconRegistry {
    libraries: HashMap<String, IconLibrary>,
}

impl IconRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a library under its own name.
    ///
    /// # Errors
    ///
    /// [`IconError::LibraryExists`] if the name is taken.
    pub fn register(&mut self, library: IconLibrary) -> Result<&mut IconLibrary, IconError> {
        match self.libraries.entry(library.name().into()) {
            Entry::Occupied(entry) => Err(IconError::LibraryExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                log::debug!("registered icon library `{}`", library.name());
                Ok(entry.insert(library))
            }
        }
    }

    /// Returns a library.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IconLibrary> {
        self.libraries.get(name)
    }

    /// Returns a library mutably, for requesting icons.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut IconLibrary> {
        self.libraries.get_mut(name)
    }

    /// Returns `true` if a library is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.libraries.contains_key(name)
    }

    /// Removes a library. Returns `true` if it was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.libraries.remove(name).is_some()
    }

    /// Iterates over registered library names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.libraries.keys().map(String::as_str)
    }
}
