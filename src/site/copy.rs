//! "Copy" buttons on highlighted code blocks.

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::Listener;

const BLOCK_SELECTOR: &str = ".chroma";
const BUTTON_CLASS: &str = "copy-code-btn";
pub const LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
const RESET_MS: u32 = 2000;

fn code_text(block: &Element) -> Option<String> {
	let code = block.query_selector("code").ok().flatten()?;
	Some(match code.dyn_ref::<HtmlElement>() {
		Some(el) => el.inner_text(),
		None => code.text_content().unwrap_or_default(),
	})
}

async fn copy(button: Element, text: String) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	JsFuture::from(window.navigator().clipboard().write_text(&text)).await?;
	button.set_text_content(Some(COPIED_LABEL));
	TimeoutFuture::new(RESET_MS).await;
	button.set_text_content(Some(LABEL));
	Ok(())
}

/// Give every code block exactly one copy button and return the click
/// listeners, which stay active until dropped.
pub fn install(document: &Document) -> Result<Vec<Listener>, JsValue> {
	let blocks = document.query_selector_all(BLOCK_SELECTOR)?;
	let mut listeners = Vec::with_capacity(blocks.length() as usize);
	for i in 0..blocks.length() {
		let Some(block) = blocks.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
			continue;
		};
		let button = match block.query_selector(&format!(".{BUTTON_CLASS}"))? {
			Some(existing) => existing,
			None => {
				let created = document.create_element("button")?;
				created.set_class_name(BUTTON_CLASS);
				created.set_text_content(Some(LABEL));
				block.append_child(&created)?;
				created
			}
		};

		let target = button.clone();
		listeners.push(Listener::new(&button, "click", move |_| {
			let Some(text) = code_text(&block) else {
				return;
			};
			let button = target.clone();
			spawn_local(async move {
				if let Err(e) = copy(button, text).await {
					warn!("copy: clipboard write failed: {:?}", e);
				}
			});
		})?);
	}
	Ok(listeners)
}
