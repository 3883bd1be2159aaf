// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reactive [`Element`]: accessor, change pipeline, render scheduler and
//! lifecycle coordinator for one widget instance.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::fmt;
use core::time::Duration;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value as JsonValue;
use understory_frame::{TickHandle, TickSource};

use crate::attributes::AttributeMap;
use crate::changes::ChangeSet;
use crate::complete::{UpdateComplete, Waiters};
use crate::error::{LifecycleError, PropertyError, RenderError, UpdateError};
use crate::event::CustomEvent;
use crate::id::PropertyId;
use crate::overlay::StyleOverlay;
use crate::registry::ElementRegistry;
use crate::schema::{PropertyDescriptor, Schema};
use crate::state::{PropertyState, Props};
use crate::tree::Node;
use crate::value::Value;
use crate::widget::Widget;

/// How long [`Element::update_complete`] waits before timing out, unless
/// changed with [`Element::set_update_timeout`].
pub const DEFAULT_UPDATE_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Where an element is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Created but never connected.
    Constructed,
    /// Attached to a document; renders are scheduled.
    Connected,
    /// Detached; state is kept and changes accumulate until reconnect.
    Disconnected,
}

/// One reactive widget instance.
///
/// The element owns the widget, its property state, attributes, pending
/// changes and `:host` style overlay. Every property write goes through the
/// same pipeline:
///
/// 1. the descriptor's parser coerces the value;
/// 2. a write equal to the stored value (same-value comparison) stops here;
/// 3. the value is stored, reflected to its attribute and CSS variable if
///    flagged, and [`Widget::after_property_update`] runs;
/// 4. unless the property is `no_render`, the change is recorded and, while
///    connected, one tick is requested from the [`TickSource`].
///
/// The host delivers the tick back through [`on_tick`](Self::on_tick), which
/// flushes every change recorded since the request in a single render.
///
/// # Example
///
/// ```rust
/// use core::time::Duration;
/// use understory_element::{Element, ElementRegistry, Node, PropertyDeclaration, Props, RenderError, Widget};
/// use understory_frame::FrameQueue;
///
/// struct Meter;
///
/// impl Widget for Meter {
///     fn properties() -> Vec<PropertyDeclaration> {
///         vec![
///             PropertyDeclaration::number("value").default_value(0.0),
///             PropertyDeclaration::string("label").reflect(true),
///         ]
///     }
///
///     fn render(&self, props: &Props<'_>) -> Result<Node, RenderError> {
///         let value = props.number("value").unwrap_or_default();
///         Ok(Node::element("meter").attr("value", value.to_string()).into())
///     }
/// }
///
/// let mut registry = ElementRegistry::new();
/// let mut frames = FrameQueue::new();
/// let mut meter = Element::new(Meter, &mut registry);
/// meter.connect().unwrap();
/// assert_eq!(meter.render_count(), 1);
///
/// meter.set("value", 5.0, &mut frames.source(0)).unwrap();
/// meter.set("label", "ok", &mut frames.source(0)).unwrap();
/// assert_eq!(meter.attributes().get("label"), Some("ok"));
///
/// for request in frames.begin_frame(Duration::from_millis(16)) {
///     meter.on_tick(request.handle, Duration::from_millis(16));
/// }
/// assert_eq!(meter.render_count(), 2);
/// assert_eq!(meter.committed().unwrap().to_string(), r#"<meter value="5"></meter>"#);
/// ```
pub struct Element<W: Widget> {
    widget: W,
    schema: Arc<Schema>,
    shared_styles: Arc<[String]>,
    tag: Option<String>,
    state: PropertyState,
    pending: ChangeSet,
    attributes: AttributeMap,
    overlay: StyleOverlay,
    lifecycle: Lifecycle,
    scheduled: Option<TickHandle>,
    committed: Option<Node>,
    render_count: u64,
    has_first_updated: bool,
    last_error: Option<RenderError>,
    waiters: Waiters,
    update_timeout: Duration,
    events: Vec<CustomEvent>,
}

impl<W: Widget> Element<W> {
    /// Creates an element for `widget`.
    ///
    /// The schema and shared styles come from the registry's per-type cache.
    /// Declared defaults are written through the regular pipeline, so they are
    /// reflected and recorded as pending changes; the first
    /// [`connect`](Self::connect) flushes them.
    pub fn new(widget: W, registry: &mut ElementRegistry) -> Self {
        let schema = registry.schema::<W>();
        let mut element = Self {
            widget,
            schema: Arc::clone(&schema),
            shared_styles: registry.styles::<W>(),
            tag: registry.tag_of::<W>().map(String::from),
            state: PropertyState::new(schema.len()),
            pending: ChangeSet::new(),
            attributes: AttributeMap::new(),
            overlay: StyleOverlay::new(),
            lifecycle: Lifecycle::Constructed,
            scheduled: None,
            committed: None,
            render_count: 0,
            has_first_updated: false,
            last_error: None,
            waiters: Waiters::default(),
            update_timeout: DEFAULT_UPDATE_TIMEOUT,
            events: Vec::new(),
        };
        for descriptor in schema.iter() {
            if let Some(default) = descriptor.default_value() {
                let _ = element.write(descriptor.id(), default.clone());
            }
        }
        element
    }

    fn label(&self) -> &str {
        self.tag.as_deref().unwrap_or_else(|| type_name::<W>())
    }

    // --- accessors ---

    /// Returns the id of a declared property.
    ///
    /// # Errors
    ///
    /// [`PropertyError::Unknown`] if the schema does not declare `name`.
    pub fn id_of(&self, name: &str) -> Result<PropertyId, PropertyError> {
        self.schema
            .by_name(name)
            .ok_or_else(|| PropertyError::Unknown(name.into()))
    }

    /// Returns the current value of a property. No side effects.
    ///
    /// # Errors
    ///
    /// [`PropertyError::Unknown`] if the schema does not declare `name`.
    pub fn get(&self, name: &str) -> Result<&Value, PropertyError> {
        let id = self.id_of(name)?;
        self.get_id(id)
    }

    /// Returns the current value of a property by id.
    ///
    /// # Errors
    ///
    /// [`PropertyError::UnknownId`] if the id is outside the schema.
    pub fn get_id(&self, id: PropertyId) -> Result<&Value, PropertyError> {
        self.state.get(id).ok_or(PropertyError::UnknownId(id))
    }

    /// Returns a read-only view of all properties.
    #[must_use]
    pub fn props(&self) -> Props<'_> {
        Props::new(&self.schema, &self.state)
    }

    /// Writes a property through the change pipeline.
    ///
    /// Returns `true` if the stored value changed.
    ///
    /// # Errors
    ///
    /// [`PropertyError::Unknown`] if the schema does not declare `name`.
    pub fn set<S: TickSource + ?Sized>(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        ticks: &mut S,
    ) -> Result<bool, PropertyError> {
        let id = self.id_of(name)?;
        self.set_id(id, value, ticks)
    }

    /// Writes a property by id through the change pipeline.
    ///
    /// # Errors
    ///
    /// [`PropertyError::UnknownId`] if the id is outside the schema.
    pub fn set_id<S: TickSource + ?Sized>(
        &mut self,
        id: PropertyId,
        value: impl Into<Value>,
        ticks: &mut S,
    ) -> Result<bool, PropertyError> {
        let changed = self.write(id, value.into())?;
        self.schedule(ticks);
        Ok(changed)
    }

    /// Stores a coerced value with no side effects at all: no reflection, no
    /// CSS variable, no hooks, no render.
    ///
    /// # Errors
    ///
    /// [`PropertyError::Unknown`] if the schema does not declare `name`.
    pub fn set_silent(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PropertyError> {
        let id = self.id_of(name)?;
        let schema = Arc::clone(&self.schema);
        let descriptor = schema.get(id).ok_or(PropertyError::UnknownId(id))?;
        let value = descriptor.parse(value.into());
        log::trace!("{}: `{name}` set silently to {value:?}", self.label());
        self.state.replace(id, value);
        Ok(())
    }

    fn write(&mut self, id: PropertyId, value: Value) -> Result<bool, PropertyError> {
        let schema = Arc::clone(&self.schema);
        let descriptor = schema.get(id).ok_or(PropertyError::UnknownId(id))?;
        let new = descriptor.parse(value);
        let current = self.state.get(id).ok_or(PropertyError::UnknownId(id))?;
        if *current == new {
            log::trace!("{}: `{}` unchanged", self.label(), descriptor.name());
            return Ok(false);
        }

        let old = self.state.replace(id, new.clone()).unwrap_or_default();
        if descriptor.reflects() {
            self.reflect(descriptor, &new);
        }
        if let Some(var) = descriptor.css_var_name() {
            match new.to_css_text() {
                Some(text) => self.overlay.set(var, text),
                None => self.overlay.remove(var),
            };
        }
        log::trace!(
            "{}: `{}` changed {old:?} -> {new:?}",
            self.label(),
            descriptor.name()
        );

        self.widget
            .after_property_update(descriptor.name(), &new, &old);
        if descriptor.renders() {
            self.pending
                .record(id, Arc::clone(descriptor.shared_name()), old, new);
        }
        Ok(true)
    }

    fn reflect(&mut self, descriptor: &PropertyDescriptor, value: &Value) {
        let Some(attribute) = descriptor.attribute() else {
            return;
        };
        match descriptor.convert(value) {
            Some(text) => {
                self.attributes.set(attribute, text);
            }
            None => {
                self.attributes.remove(attribute);
            }
        }
    }

    // --- attribute observer ---

    /// Feeds an attribute mutation into the property pipeline.
    ///
    /// Only watched attributes reach their property; the raw text (or `Null`
    /// on removal) goes through the property's parser and the usual
    /// same-value check. Returns `true` if a property changed.
    pub fn attribute_changed<S: TickSource + ?Sized>(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
        ticks: &mut S,
    ) -> bool {
        if old == new {
            return false;
        }
        let Some(id) = self.schema.by_attribute(name) else {
            return false;
        };
        if !self.schema.get(id).is_some_and(PropertyDescriptor::is_watched) {
            log::trace!("{}: attribute `{name}` is not watched", self.label());
            return false;
        }
        let value = new.map_or(Value::Null, Value::from);
        self.set_id(id, value, ticks).unwrap_or(false)
    }

    /// Sets an attribute from outside and notifies the observer.
    ///
    /// Returns `true` if a property changed.
    pub fn set_attribute<S: TickSource + ?Sized>(
        &mut self,
        name: &str,
        value: &str,
        ticks: &mut S,
    ) -> bool {
        let old = self.attributes.set(name, value);
        self.attribute_changed(name, old.as_deref(), Some(value), ticks)
    }

    /// Removes an attribute from outside and notifies the observer.
    ///
    /// Returns `true` if a property changed.
    pub fn remove_attribute<S: TickSource + ?Sized>(&mut self, name: &str, ticks: &mut S) -> bool {
        let Some(old) = self.attributes.remove(name) else {
            return false;
        };
        self.attribute_changed(name, Some(&old), None, ticks)
    }

    /// Returns the attribute names whose mutation reaches a property.
    pub fn observed_attributes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.schema.observed_attributes()
    }

    // --- render scheduler ---

    fn schedule<S: TickSource + ?Sized>(&mut self, ticks: &mut S) {
        if self.lifecycle != Lifecycle::Connected
            || self.scheduled.is_some()
            || self.pending.is_empty()
        {
            return;
        }
        let handle = ticks.request_tick();
        log::trace!(
            "{}: render scheduled as {handle:?} with {} pending changes",
            self.label(),
            self.pending.len()
        );
        self.scheduled = Some(handle);
    }

    /// Delivers a tick at host time `now`.
    ///
    /// Runs the pending render if `handle` is the tick this element is waiting
    /// for; stale handles (cancelled or superseded requests) are ignored. Also
    /// times out [`update_complete`](Self::update_complete) waits whose
    /// deadline has passed. Returns `true` if a render ran.
    pub fn on_tick(&mut self, handle: TickHandle, now: Duration) -> bool {
        if self.scheduled != Some(handle) {
            log::trace!("{}: ignoring stale tick {handle:?}", self.label());
            self.waiters.expire(now);
            return false;
        }
        self.scheduled = None;
        if self.lifecycle != Lifecycle::Connected {
            log::debug!("{}: tick while disconnected, render skipped", self.label());
            return false;
        }
        self.perform_update();
        self.waiters.expire(now);
        true
    }

    /// Cancels any scheduled tick and renders synchronously.
    ///
    /// Does nothing while disconnected. Returns `true` if a render ran.
    pub fn force_update<S: TickSource + ?Sized>(&mut self, ticks: &mut S) -> bool {
        if self.lifecycle != Lifecycle::Connected {
            log::debug!("{}: force_update while not connected", self.label());
            return false;
        }
        if let Some(handle) = self.scheduled.take() {
            ticks.cancel_tick(handle);
        }
        self.perform_update();
        true
    }

    fn perform_update(&mut self) {
        let changes = self.pending.take();
        log::trace!(
            "{}: update #{} with {} changes",
            self.label(),
            self.render_count + 1,
            changes.len()
        );

        let props = Props::new(&self.schema, &self.state);
        self.widget.before_update(&props, &changes);

        let widget = &self.widget;
        let result = panic::catch_unwind(AssertUnwindSafe(|| widget.render(&props)))
            .unwrap_or_else(|payload| Err(RenderError::new(panic_message(&*payload))));
        let rendered = match result {
            Ok(tree) => {
                self.committed = Some(tree);
                self.last_error = None;
                true
            }
            Err(err) => {
                log::error!("{}: render failed: {err}", self.label());
                self.committed = Some(Node::render_error(err.message()));
                self.last_error = Some(err);
                false
            }
        };
        self.render_count += 1;

        let props = Props::new(&self.schema, &self.state);
        self.widget.after_update(&props, &changes);
        if rendered && !self.has_first_updated {
            self.has_first_updated = true;
            self.widget.first_updated(&props, &changes);
        }
        self.waiters.resolve_all();
    }

    /// Returns a future that settles once no render is pending.
    ///
    /// Settles immediately if nothing is scheduled. Otherwise it resolves after
    /// the next update, rejects with [`UpdateError::Disconnected`] on
    /// disconnect, and with [`UpdateError::Timeout`] once a tick or
    /// [`expire_waiters`](Self::expire_waiters) reports a host time past
    /// `now + update_timeout`.
    pub fn update_complete(&mut self, now: Duration) -> UpdateComplete {
        if self.scheduled.is_none() {
            return UpdateComplete::ready(Ok(()));
        }
        self.waiters.wait(now, self.update_timeout)
    }

    /// Times out waits whose deadline has passed. Returns how many.
    pub fn expire_waiters(&mut self, now: Duration) -> usize {
        self.waiters.expire(now)
    }

    /// Sets how long [`update_complete`](Self::update_complete) waits.
    pub fn set_update_timeout(&mut self, timeout: Duration) {
        self.update_timeout = timeout;
    }

    /// Returns the update timeout.
    #[must_use]
    pub fn update_timeout(&self) -> Duration {
        self.update_timeout
    }

    // --- lifecycle ---

    /// Attaches the element.
    ///
    /// Renders synchronously if nothing has been committed yet or if changes
    /// are pending from a cancelled window, then runs
    /// [`Widget::on_mounted`].
    ///
    /// # Errors
    ///
    /// [`LifecycleError::AlreadyConnected`] if already connected.
    pub fn connect(&mut self) -> Result<(), LifecycleError> {
        if self.lifecycle == Lifecycle::Connected {
            return Err(LifecycleError::AlreadyConnected);
        }
        log::debug!("{}: connected", self.label());
        self.lifecycle = Lifecycle::Connected;
        if self.committed.is_none() || !self.pending.is_empty() {
            self.perform_update();
        }
        self.widget.on_mounted();
        Ok(())
    }

    /// Detaches the element.
    ///
    /// Cancels the scheduled render, rejects pending
    /// [`update_complete`](Self::update_complete) waits and runs
    /// [`Widget::on_unmounted`]. Pending changes are kept for reconnect.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::NotConnected`] if not connected.
    pub fn disconnect<S: TickSource + ?Sized>(&mut self, ticks: &mut S) -> Result<(), LifecycleError> {
        if self.lifecycle != Lifecycle::Connected {
            return Err(LifecycleError::NotConnected);
        }
        if let Some(handle) = self.scheduled.take() {
            let withdrawn = ticks.cancel_tick(handle);
            log::debug!(
                "{}: cancelled render {handle:?} (withdrawn: {withdrawn}), {} changes kept",
                self.label(),
                self.pending.len()
            );
        }
        log::debug!("{}: disconnected", self.label());
        self.lifecycle = Lifecycle::Disconnected;
        self.waiters.reject_all(UpdateError::Disconnected);
        self.widget.on_unmounted();
        Ok(())
    }

    /// Reports that the element moved to another document.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::NotConnected`] if not connected.
    pub fn adopt(&mut self) -> Result<(), LifecycleError> {
        if self.lifecycle != Lifecycle::Connected {
            return Err(LifecycleError::NotConnected);
        }
        log::debug!("{}: adopted", self.label());
        self.widget.on_adopted();
        Ok(())
    }

    // --- events ---

    /// Queues a bubbling, composed [`CustomEvent`].
    pub fn dispatch_event(&mut self, name: impl Into<String>, detail: JsonValue) {
        self.dispatch(CustomEvent::new(name, detail));
    }

    /// Queues an event.
    pub fn dispatch(&mut self, event: CustomEvent) {
        log::trace!("{}: dispatch `{}`", self.label(), event.name());
        self.events.push(event);
    }

    /// Drains queued events in dispatch order.
    pub fn take_events(&mut self) -> Vec<CustomEvent> {
        core::mem::take(&mut self.events)
    }

    // --- inspection ---

    /// Returns the widget.
    #[must_use]
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Returns the widget mutably. Changes made here are not tracked.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Returns the shared schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the tag the widget type was defined under when this element
    /// was created.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns `true` while connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.lifecycle == Lifecycle::Connected
    }

    /// Returns `true` while a tick is requested and not yet delivered.
    #[must_use]
    pub fn is_update_pending(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Returns the tick this element is waiting for.
    #[must_use]
    pub fn scheduled_tick(&self) -> Option<TickHandle> {
        self.scheduled
    }

    /// Returns the changes recorded since the last render.
    #[must_use]
    pub fn pending_changes(&self) -> &ChangeSet {
        &self.pending
    }

    /// Returns the last committed tree.
    #[must_use]
    pub fn committed(&self) -> Option<&Node> {
        self.committed.as_ref()
    }

    /// Returns the number of renders run, including failed ones.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Returns the error of the last render, if it failed.
    #[must_use]
    pub fn last_render_error(&self) -> Option<&RenderError> {
        self.last_error.as_ref()
    }

    /// Returns `true` once [`Widget::first_updated`] has run.
    #[must_use]
    pub fn has_first_updated(&self) -> bool {
        self.has_first_updated
    }

    /// Returns the attributes.
    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Returns the `:host` style overlay.
    #[must_use]
    pub fn overlay(&self) -> &StyleOverlay {
        &self.overlay
    }

    /// Returns the adopted style sheets: the widget type's shared sheets
    /// followed by this element's overlay.
    pub fn adopted_styles(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        self.shared_styles
            .iter()
            .map(|sheet| Cow::Borrowed(sheet.as_str()))
            .chain(core::iter::once(Cow::Owned(self.overlay.css_text())))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        String::from(*message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("render panicked")
    }
}

impl<W: Widget> fmt::Debug for Element<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("widget", &type_name::<W>())
            .field("tag", &self.tag)
            .field("props", &self.props())
            .field("lifecycle", &self.lifecycle)
            .field("scheduled", &self.scheduled)
            .field("pending", &self.pending.len())
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyDeclaration;
    use understory_frame::FrameQueue;

    struct Probe;

    impl Widget for Probe {
        fn properties() -> Vec<PropertyDeclaration> {
            vec![
                PropertyDeclaration::number("value").default_value(1.0),
                PropertyDeclaration::string("note").no_render(true),
            ]
        }

        fn render(&self, props: &Props<'_>) -> Result<Node, RenderError> {
            Ok(Node::text(props.get("value").map(Value::to_text).unwrap_or_default()))
        }
    }

    #[test]
    fn defaults_are_pending_until_connect() {
        let mut registry = ElementRegistry::new();
        let mut element = Element::new(Probe, &mut registry);
        assert_eq!(element.get("value"), Ok(&Value::Number(1.0)));
        assert_eq!(element.get("note"), Ok(&Value::Null));
        assert_eq!(element.pending_changes().len(), 1);
        assert_eq!(element.lifecycle(), Lifecycle::Constructed);

        element.connect().unwrap();
        assert_eq!(element.render_count(), 1);
        assert!(element.pending_changes().is_empty());
        assert_eq!(element.committed().unwrap().text_content(), "1");
    }

    #[test]
    fn writes_before_connect_do_not_request_ticks() {
        let mut registry = ElementRegistry::new();
        let mut frames = FrameQueue::new();
        let mut element = Element::new(Probe, &mut registry);
        assert_eq!(element.set("value", 2.0, &mut frames.source(())), Ok(true));
        assert!(frames.is_empty());
        assert!(!element.is_update_pending());
    }

    #[test]
    fn no_render_property_never_schedules() {
        let mut registry = ElementRegistry::new();
        let mut frames = FrameQueue::new();
        let mut element = Element::new(Probe, &mut registry);
        element.connect().unwrap();

        assert_eq!(element.set("note", "x", &mut frames.source(())), Ok(true));
        assert!(frames.is_empty());
        assert!(element.pending_changes().is_empty());
    }

    #[test]
    fn stale_tick_is_ignored() {
        let mut registry = ElementRegistry::new();
        let mut frames = FrameQueue::new();
        let mut element = Element::new(Probe, &mut registry);
        element.connect().unwrap();
        element.set("value", 3.0, &mut frames.source(())).unwrap();

        assert!(!element.on_tick(TickHandle::from_raw(999), Duration::ZERO));
        assert!(element.is_update_pending());
        assert_eq!(element.render_count(), 1);
    }

    #[test]
    fn unknown_property() {
        let mut registry = ElementRegistry::new();
        let mut frames = FrameQueue::<()>::new();
        let mut element = Element::new(Probe, &mut registry);
        assert_eq!(
            element.get("missing"),
            Err(PropertyError::Unknown("missing".into()))
        );
        assert_eq!(
            element.set("missing", 1.0, &mut frames.source(())),
            Err(PropertyError::Unknown("missing".into()))
        );
        assert_eq!(
            element.get_id(PropertyId::new(9)),
            Err(PropertyError::UnknownId(PropertyId::new(9)))
        );
    }

    #[test]
    fn panic_messages() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&String::from("bang")), "bang");
        assert_eq!(panic_message(&7_u8), "render panicked");
    }
}
