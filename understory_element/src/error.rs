// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;

use crate::id::PropertyId;

/// A property access named something the schema does not declare.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// No property with this name.
    #[error("unknown property `{0}`")]
    Unknown(String),
    /// No property with this id.
    #[error("unknown property id {0}")]
    UnknownId(PropertyId),
}

/// An invalid lifecycle transition. Nothing fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// `connect` on an element that is already connected.
    #[error("element is already connected")]
    AlreadyConnected,
    /// `disconnect` or `adopt` on an element that is not connected.
    #[error("element is not connected")]
    NotConnected,
}

/// Why an [`UpdateComplete`](crate::UpdateComplete) wait failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// The element was disconnected while a render was pending.
    #[error("element disconnected before the update completed")]
    Disconnected,
    /// No render completed within the element's update timeout.
    #[error("update did not complete in time")]
    Timeout,
}

/// A widget type could not be defined under a tag name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefineError {
    /// Tag names must be lowercase and contain a hyphen.
    #[error("invalid tag name `{0}`: must be lowercase and contain a hyphen")]
    InvalidTagName(String),
    /// The tag is already defined for another widget type.
    #[error("tag `{tag}` is already defined for `{existing}`")]
    TagInUse {
        /// The requested tag.
        tag: String,
        /// Type name of the widget already using the tag.
        existing: &'static str,
    },
    /// The widget type is already defined under another tag.
    #[error("`{type_name}` is already defined as `{tag}`")]
    TypeAlreadyDefined {
        /// Type name of the widget.
        type_name: &'static str,
        /// The tag it is defined under.
        tag: String,
    },
}

/// A render callback failed.
///
/// Returned from [`Widget::render`](crate::Widget::render); a panicking
/// render is turned into one of these too. Either way the element commits a
/// fallback tree and stays usable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    /// Creates a render error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            PropertyError::Unknown("size".into()).to_string(),
            "unknown property `size`"
        );
        assert_eq!(
            PropertyError::UnknownId(PropertyId::new(4)).to_string(),
            "unknown property id PropertyId(4)"
        );
        assert_eq!(
            DefineError::TagInUse {
                tag: "bui-range".into(),
                existing: "Range",
            }
            .to_string(),
            "tag `bui-range` is already defined for `Range`"
        );
        assert_eq!(RenderError::new("boom").to_string(), "boom");
    }
}
