// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Element: a schema-driven reactive element base.
//!
//! A widget declares its properties once; this crate turns the declarations
//! into a shared [`Schema`] and drives each widget instance through an
//! [`Element`] that keeps property values, attributes and CSS custom properties
//! in sync, and coalesces any number of writes into one render per tick.
//!
//! ## Core Concepts
//!
//! - **Schema normalizer**: [`Schema::normalize`] expands terse
//!   [`PropertyDeclaration`]s into complete [`PropertyDescriptor`]s and repairs
//!   inconsistencies with a warning. The [`ElementRegistry`] caches one schema
//!   per widget type.
//! - **Accessors**: [`Element::get`] and [`Element::set`] read and write
//!   properties by name; writes are coerced by the property's
//!   [`CoercionType`] or a custom parser.
//! - **Change pipeline**: a write that changes the stored value (same-value
//!   comparison) is reflected into its attribute, mirrored into a `--name`
//!   custom property on the element's [`StyleOverlay`], reported to
//!   [`Widget::after_property_update`] and recorded in the pending
//!   [`ChangeSet`].
//! - **Render scheduler**: the first recorded change requests a tick from a
//!   [`TickSource`]; [`Element::on_tick`] flushes all changes in one render.
//! - **Lifecycle**: [`Element::connect`], [`Element::disconnect`] and
//!   [`Element::adopt`] run the widget's hooks; disconnecting cancels the
//!   scheduled render, and reconnecting renders pending changes synchronously.
//! - **Attribute observer**: [`Element::attribute_changed`] feeds watched
//!   attribute mutations back into the property pipeline.
//!
//! ## Quick Start
//!
//! ```rust
//! use core::time::Duration;
//! use understory_element::{
//!     ChangeSet, Element, ElementRegistry, Node, PropertyDeclaration, Props, RenderError,
//!     Value, Widget,
//! };
//! use understory_frame::FrameQueue;
//!
//! #[derive(Default)]
//! struct Range {
//!     flushes: Vec<usize>,
//! }
//!
//! impl Widget for Range {
//!     fn properties() -> Vec<PropertyDeclaration> {
//!         vec![
//!             PropertyDeclaration::number("value").default_value(0.0).css_var(true),
//!             PropertyDeclaration::string("label").reflect(true),
//!         ]
//!     }
//!
//!     fn render(&self, props: &Props<'_>) -> Result<Node, RenderError> {
//!         Ok(Node::element("div")
//!             .text(props.str("label").unwrap_or_default())
//!             .into())
//!     }
//!
//!     fn after_update(&mut self, _props: &Props<'_>, changes: &ChangeSet) {
//!         self.flushes.push(changes.len());
//!     }
//! }
//!
//! let mut registry = ElementRegistry::new();
//! registry.define::<Range>("bui-range").unwrap();
//!
//! let mut frames = FrameQueue::new();
//! let mut range = Element::new(Range::default(), &mut registry);
//! range.connect().unwrap();
//!
//! // Attributes feed watched properties through their parser.
//! range.set_attribute("value", "5", &mut frames.source(()));
//! range.set("value", 7.0, &mut frames.source(())).unwrap();
//! range.set("label", "ok", &mut frames.source(())).unwrap();
//! assert_eq!(range.get("value"), Ok(&Value::Number(7.0)));
//! assert_eq!(range.attributes().get("label"), Some("ok"));
//! assert_eq!(range.overlay().get("--value"), Some("7"));
//!
//! // One tick, one render with both changes.
//! for request in frames.begin_frame(Duration::from_millis(16)) {
//!     range.on_tick(request.handle, Duration::from_millis(16));
//! }
//! assert_eq!(range.widget().flushes, [1, 2]);
//! ```
//!
//! ## Threading
//!
//! An [`Element`] is single-threaded: it hands out [`UpdateComplete`] futures
//! backed by `Rc`. Normalized schemas are shared through `Arc` and may be read
//! from any thread.

extern crate alloc;

mod attributes;
mod changes;
pub mod coerce;
mod complete;
mod element;
mod error;
mod event;
mod id;
mod overlay;
pub mod parsers;
mod registry;
mod schema;
mod state;
mod tree;
mod value;
mod widget;

pub use attributes::AttributeMap;
pub use changes::{Change, ChangeSet};
pub use coerce::{CoercionType, Converter, NumberFallback, Parser};
pub use complete::UpdateComplete;
pub use element::{DEFAULT_UPDATE_TIMEOUT, Element, Lifecycle};
pub use error::{DefineError, LifecycleError, PropertyError, RenderError, UpdateError};
pub use event::CustomEvent;
pub use id::PropertyId;
pub use overlay::StyleOverlay;
pub use registry::ElementRegistry;
pub use schema::{PropertyDeclaration, PropertyDescriptor, PropertyFlags, Schema};
pub use state::Props;
pub use tree::{ElementNode, Node};
pub use value::Value;
pub use widget::Widget;

pub use understory_frame::{TickHandle, TickSource};
