//! Thin helpers over web-sys: removable listeners, element lookup and fetch.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Response};

use crate::error::LoadError;

/// An event listener that removes itself from its target when dropped.
pub struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	/// Attach `handler` to `target` for `event`.
	pub fn new(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, JsValue> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}

	/// Attach a non-passive listener so `handler` may call `prevent_default`
	/// on wheel and touch events.
	pub fn active(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, JsValue> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		let options = AddEventListenerOptions::new();
		options.set_passive(false);
		target.add_event_listener_with_callback_and_add_event_listener_options(
			event,
			callback.as_ref().unchecked_ref(),
			&options,
		)?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// The current document, if running in a browser.
pub fn document() -> Option<Document> {
	web_sys::window()?.document()
}

/// Look up an element by id and cast it to `HtmlElement`.
pub fn html_element_by_id(id: &str) -> Option<HtmlElement> {
	document()?.get_element_by_id(id)?.dyn_into().ok()
}

/// Whether the event target sits inside an element matching `selector`.
pub fn target_within(event: &Event, selector: &str) -> bool {
	event
		.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.and_then(|el| el.closest(selector).ok().flatten())
		.is_some()
}

/// `GET url` and return the body as text. Non-2xx responses are errors.
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
	let window = web_sys::window().ok_or(LoadError::NoWindow)?;
	let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_owned(),
			status: response.status(),
		});
	}
	let body = JsFuture::from(response.text()?).await?;
	body.as_string()
		.ok_or_else(|| LoadError::Js(format!("{url} returned a non-text body")))
}
