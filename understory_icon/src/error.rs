// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Errors from loading icons and registering libraries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IconError {
    /// The fetcher could not retrieve the icon.
    #[error("failed to fetch `{locator}`: {message}")]
    Fetch {
        /// Where the icon was fetched from.
        locator: String,
        /// What went wrong.
        message: String,
    },
    /// The fetch answered with a non-success status.
    #[error("failed to fetch `{locator}` ({status})")]
    Status {
        /// Where the icon was fetched from.
        locator: String,
        /// The status code.
        status: u16,
    },
    /// The fetched document's root element is not `<svg>`.
    #[error("`{locator}` is not an SVG document (root: {root:?})")]
    NotSvg {
        /// Where the icon was fetched from.
        locator: String,
        /// The root element found, if any.
        root: Option<String>,
    },
    /// A library with this name is already registered.
    #[error("icon library `{0}` is already registered")]
    LibraryExists(String),
}

impl IconError {
    /// Creates a [`IconError::Fetch`].
    #[must_use]
    pub fn fetch(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            locator: locator.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(
            IconError::fetch("/icons/a.svg", "offline").to_string(),
            "failed to fetch `/icons/a.svg`: offline"
        );
        assert_eq!(
            IconError::Status {
                locator: "/icons/a.svg".into(),
                status: 404
            }
            .to_string(),
            "failed to fetch `/icons/a.svg` (404)"
        );
        assert_eq!(
            IconError::LibraryExists("default".into()).to_string(),
            "icon library `default` is already registered"
        );
    }
}
