//! Disposable event subscriptions.
//!
//! A [`Subscription`] owns the teardown for something registered elsewhere
//! (a DOM listener, a scheduled callback). Teardown runs exactly once, either
//! through [`Subscription::unsubscribe`] or when the subscription is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// Handle that tears down a registration exactly once.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
	teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	pub fn new(teardown: impl FnOnce() + 'static) -> Self {
		Self {
			teardown: Some(Box::new(teardown)),
		}
	}

	/// Run the teardown now. Later calls do nothing.
	pub fn unsubscribe(&mut self) {
		if let Some(teardown) = self.teardown.take() {
			teardown();
		}
	}

	pub fn is_active(&self) -> bool {
		self.teardown.is_some()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.unsubscribe();
	}
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.is_active())
			.finish()
	}
}

/// Shared holder for at most one armed subscription.
///
/// Arming a new subscription disposes the one it replaces. Teardowns run after
/// the slot is released, so they may touch the slot themselves.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionSlot(Rc<RefCell<Option<Subscription>>>);

impl SubscriptionSlot {
	pub fn arm(&self, subscription: Subscription) {
		let previous = self.0.replace(Some(subscription));
		drop(previous);
	}

	pub fn disarm(&self) {
		let previous = self.0.take();
		drop(previous);
	}

	pub fn is_armed(&self) -> bool {
		self.0.borrow().as_ref().is_some_and(Subscription::is_active)
	}
}

/// Register `handler` for `event` on `target`.
///
/// The returned subscription removes the listener and frees the closure. With
/// `once`, the browser also drops the registration after the first event.
pub fn listen(
	target: &EventTarget,
	event: &'static str,
	once: bool,
	handler: impl FnMut(Event) + 'static,
) -> Result<Subscription, JsValue> {
	let closure = Closure::<dyn FnMut(Event)>::new(handler);
	let options = AddEventListenerOptions::new();
	options.set_once(once);
	target.add_event_listener_with_callback_and_add_event_listener_options(
		event,
		closure.as_ref().unchecked_ref(),
		&options,
	)?;

	let target = target.clone();
	Ok(Subscription::new(move || {
		if let Err(e) =
			target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
		{
			warn!("coauthor-graph: failed to remove {event} listener: {e:?}");
		}
		drop(closure);
	}))
}
