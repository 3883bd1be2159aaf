// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom events emitted by elements.

use alloc::string::String;

use serde_json::Value as JsonValue;

/// A named event with a JSON detail payload.
///
/// Events are queued by [`Element::dispatch_event`](crate::Element::dispatch_event)
/// and drained by the host with [`Element::take_events`](crate::Element::take_events).
/// They bubble and cross shadow boundaries unless told otherwise.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use understory_element::CustomEvent;
///
/// let event = CustomEvent::new("change", json!({ "value": 5 })).composed(false);
/// assert!(event.is_bubbling());
/// assert!(!event.is_composed());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CustomEvent {
    name: String,
    detail: JsonValue,
    bubbles: bool,
    composed: bool,
}

impl CustomEvent {
    /// Creates a bubbling, composed event.
    #[must_use]
    pub fn new(name: impl Into<String>, detail: JsonValue) -> Self {
        Self {
            name: name.into(),
            detail,
            bubbles: true,
            composed: true,
        }
    }

    /// Sets whether the event bubbles.
    #[must_use]
    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Sets whether the event crosses shadow boundaries.
    #[must_use]
    pub fn composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the detail payload.
    #[must_use]
    pub fn detail(&self) -> &JsonValue {
        &self.detail
    }

    /// Returns whether the event bubbles.
    #[must_use]
    pub fn is_bubbling(&self) -> bool {
        self.bubbles
    }

    /// Returns whether the event crosses shadow boundaries.
    #[must_use]
    pub fn is_composed(&self) -> bool {
        self.composed
    }
}
