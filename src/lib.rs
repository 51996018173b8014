//! Browser runtime for a static notes site: an infinite-canvas board viewer
//! and force-directed link graphs, re-initialised across htmx page swaps.

use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, error, info, warn};
use wasm_bindgen::prelude::*;

pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod markdown;
pub mod site;
pub mod slug;

use crate::config::SiteConfig;
use crate::site::Site;

thread_local! {
	static SITE: RefCell<Option<Rc<Site>>> = const { RefCell::new(None) };
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

fn current_site() -> Option<Rc<Site>> {
	SITE.with(|s| s.borrow().clone())
}

/// Module entry point: read the site config and start following page loads.
#[wasm_bindgen(start)]
pub fn start() {
	init_logging();
	let site = Site::new(SiteConfig::from_document());
	if let Err(e) = site.install() {
		error!("site: install failed: {:?}", e);
		return;
	}
	SITE.with(|s| *s.borrow_mut() = Some(site));
}

/// Mount a board document supplied by the host page, either as a JSON
/// string or as a plain object.
#[wasm_bindgen(js_name = initCanvasMode)]
pub fn init_canvas_mode(data: JsValue) {
	let Some(site) = current_site() else {
		warn!("canvas: runtime not started");
		return;
	};
	match site::board_json(&data) {
		Some(json) => site.mount_board(&json),
		None => error!("canvas: board data is neither a string nor JSON-serialisable"),
	}
}

/// Toggle the enlarged local graph view.
#[wasm_bindgen(js_name = toggleGraphExpand)]
pub fn toggle_graph_expand() {
	site::toggle_graph_expand();
}
