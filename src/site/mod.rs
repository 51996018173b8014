//! Page glue: re-initialises the board, graphs and page widgets whenever the
//! host page loads or swaps content.

pub mod copy;
pub mod search;
pub mod sidebar;
pub mod theme;

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use js_sys::{Array, Reflect};
use leptos::mount::mount_to;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	Document, HtmlElement, HtmlInputElement, HtmlScriptElement, MutationObserver,
	MutationObserverInit, MutationRecord,
};

use crate::components::canvas_board::{BoardDocument, CanvasMount};
use crate::components::force_graph::{
	ForceGraphCanvas, ForceParams, GraphData, GraphLoader, HttpGraphSource, Palette,
};
use crate::config::SiteConfig;
use crate::dom::{self, Listener};

pub const BOARD_DATA_ID: &str = "canvas-data";
pub const BOARD_HOST_ID: &str = "viewport";
pub const GLOBAL_GRAPH_ID: &str = "global-graph-container";
pub const LOCAL_GRAPH_ID: &str = "local-graph-container";
pub const LOCAL_WRAPPER_ID: &str = "local-graph-wrapper";
const PAGE_TITLE_ID: &str = "page-title-data";
const PAGE_EVENTS: [&str; 3] = ["DOMContentLoaded", "htmx:afterSwap", "htmx:historyRestore"];
const THEME_ATTRIBUTES: [&str; 2] = ["data-theme", "class"];
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Re-renders the graphs when the root element's theme attributes change.
struct ThemeObserver {
	observer: MutationObserver,
	_callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl Drop for ThemeObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Everything mounted by the current page plus the listeners that outlive
/// page swaps.
pub struct Site {
	config: SiteConfig,
	loader: GraphLoader<HttpGraphSource>,
	board: RefCell<Option<CanvasMount>>,
	graphs: RefCell<Vec<Box<dyn Any>>>,
	generation: Cell<u64>,
	page_listeners: RefCell<Vec<Listener>>,
	lifecycle: RefCell<Vec<Listener>>,
	theme_observer: RefCell<Option<ThemeObserver>>,
}

impl Site {
	pub fn new(config: SiteConfig) -> Rc<Self> {
		let source = HttpGraphSource {
			url: config.graph_url(),
		};
		Rc::new(Self {
			config,
			loader: GraphLoader::new(source),
			board: RefCell::new(None),
			graphs: RefCell::new(Vec::new()),
			generation: Cell::new(0),
			page_listeners: RefCell::new(Vec::new()),
			lifecycle: RefCell::new(Vec::new()),
			theme_observer: RefCell::new(None),
		})
	}

	/// Hook page lifecycle and theme events. Initialises the current page
	/// right away when the document has already finished parsing.
	pub fn install(self: &Rc<Self>) -> Result<(), JsValue> {
		let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
		let mut lifecycle = Vec::new();

		for event in PAGE_EVENTS {
			let site = Rc::downgrade(self);
			lifecycle.push(Listener::new(&document, event, move |_| {
				with_upgraded(&site, |s| s.init_page());
			})?);
		}

		if let Some(query) = web_sys::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten()) {
			let site = Rc::downgrade(self);
			lifecycle.push(Listener::new(&query, "change", move |_| {
				with_upgraded(&site, |s| s.render_graphs());
			})?);
		}
		*self.lifecycle.borrow_mut() = lifecycle;
		*self.theme_observer.borrow_mut() = Some(self.observe_theme(&document)?);

		let ready = Reflect::get(&document, &JsValue::from_str("readyState"))?
			.as_string()
			.unwrap_or_default();
		if ready != "loading" {
			self.init_page();
		}
		info!("site: installed (base url {:?})", self.config.base_url);
		Ok(())
	}

	fn observe_theme(self: &Rc<Self>, document: &Document) -> Result<ThemeObserver, JsValue> {
		let root = document
			.document_element()
			.ok_or_else(|| JsValue::from_str("no root element"))?;
		let site = Rc::downgrade(self);
		let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
			move |records: Array, _: MutationObserver| {
				let theme_changed = records.iter().any(|r| {
					r.dyn_into::<MutationRecord>().is_ok_and(|r| {
						r.type_() == "attributes"
							&& r.attribute_name()
								.is_some_and(|name| THEME_ATTRIBUTES.contains(&name.as_str()))
					})
				});
				if theme_changed {
					with_upgraded(&site, |s| s.render_graphs());
				}
			},
		);
		let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
		let init = MutationObserverInit::new();
		init.set_attributes(true);
		let filter: Array = THEME_ATTRIBUTES.iter().map(|a| JsValue::from_str(a)).collect();
		init.set_attribute_filter(&filter);
		observer.observe_with_options(&root, &init)?;
		Ok(ThemeObserver {
			observer,
			_callback: callback,
		})
	}

	/// Drop the previous page's widgets and set up the current one.
	pub fn init_page(self: &Rc<Self>) {
		self.page_listeners.borrow_mut().clear();
		self.board.borrow_mut().take();

		let Some(document) = dom::document() else {
			return;
		};
		match self.page_widgets(&document) {
			Ok(listeners) => *self.page_listeners.borrow_mut() = listeners,
			Err(e) => warn!("site: page widgets unavailable: {:?}", e),
		}
		if let Some(pathname) = web_sys::window().and_then(|w| w.location().pathname().ok()) {
			sidebar::highlight(&document, &pathname);
		}
		self.mount_board_from_page(&document);
		self.render_graphs();
	}

	fn page_widgets(&self, document: &Document) -> Result<Vec<Listener>, JsValue> {
		let mut listeners = Vec::new();

		if let Some(toggle) = document.get_element_by_id(theme::TOGGLE_ID) {
			let doc = document.clone();
			listeners.push(Listener::new(&toggle, "click", move |_| theme::toggle(&doc))?);
		}

		if let Some(input) = document
			.get_element_by_id(search::INPUT_ID)
			.and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
		{
			let (doc, field) = (document.clone(), input.clone());
			listeners.push(Listener::new(&input, "input", move |_| {
				search::apply(&doc, &field.value());
			})?);
		}

		listeners.extend(copy::install(document)?);
		Ok(listeners)
	}

	fn mount_board_from_page(&self, document: &Document) {
		let Some(script) = document
			.get_element_by_id(BOARD_DATA_ID)
			.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
		else {
			return;
		};
		let Ok(json) = script.text() else {
			return;
		};
		self.mount_board(&json);
	}

	/// Parse a board document and mount it into the board host, replacing
	/// any board already shown.
	pub fn mount_board(&self, json: &str) {
		self.board.borrow_mut().take();
		let Some(host) = dom::html_element_by_id(BOARD_HOST_ID) else {
			debug!("canvas: no #{} on this page", BOARD_HOST_ID);
			return;
		};
		let doc = match BoardDocument::from_json(json) {
			Ok(doc) => doc,
			Err(e) => {
				error!("canvas: malformed board document: {}", e);
				return;
			}
		};
		match CanvasMount::mount(&host, &doc) {
			Ok(mount) => *self.board.borrow_mut() = Some(mount),
			Err(e) => error!("canvas: mount failed: {:?}", e),
		}
	}

	/// Redraw both graph views from (possibly cached) graph data. Results
	/// from an older render are discarded.
	pub fn render_graphs(self: &Rc<Self>) {
		let generation = self.generation.get() + 1;
		self.generation.set(generation);
		self.graphs.borrow_mut().clear();

		let global = dom::html_element_by_id(GLOBAL_GRAPH_ID);
		let local = dom::html_element_by_id(LOCAL_GRAPH_ID);
		if self.config.disable_local_graph {
			set_local_wrapper_visible(false);
		}
		let local = local.filter(|_| !self.config.disable_local_graph);
		if global.is_none() && local.is_none() {
			return;
		}

		let load = self.loader.load();
		let site = Rc::downgrade(self);
		spawn_local(async move {
			let Some(data) = load.await else {
				return;
			};
			let Some(site) = site.upgrade() else {
				return;
			};
			if site.generation.get() != generation {
				debug!("graph: dropping stale render {}", generation);
				return;
			}
			let palette = Palette::from_document();
			if let Some(host) = global {
				site.mount_graph(&host, (*data).clone(), ForceParams::global(), palette.clone(), false);
			}
			if let Some(host) = local {
				site.mount_local_graph(&host, &data, palette);
			}
		});
	}

	fn mount_local_graph(&self, host: &HtmlElement, data: &GraphData, palette: Palette) {
		let Some(title) = dom::document()
			.and_then(|d| d.get_element_by_id(PAGE_TITLE_ID))
			.and_then(|el| el.get_attribute("data-title"))
		else {
			return;
		};
		let subgraph = data.local_subgraph(&title);
		set_local_wrapper_visible(!subgraph.is_empty());
		if subgraph.is_empty() {
			return;
		}
		self.mount_graph(host, subgraph, ForceParams::local(), palette, true);
	}

	fn mount_graph(&self, host: &HtmlElement, data: GraphData, params: ForceParams, palette: Palette, local: bool) {
		host.set_inner_html("");
		let base_url = self.config.base_url.clone();
		let handle = mount_to(host.clone(), move || {
			view! {
				<ForceGraphCanvas
					data=data
					params=params
					palette=palette
					local=local
					base_url=base_url
				/>
			}
		});
		self.graphs.borrow_mut().push(Box::new(handle));
	}
}

fn set_local_wrapper_visible(visible: bool) {
	if let Some(wrapper) = dom::html_element_by_id(LOCAL_WRAPPER_ID) {
		let _ = wrapper
			.style()
			.set_property("display", if visible { "" } else { "none" });
	}
}

fn with_upgraded(site: &Weak<Site>, f: impl FnOnce(&Rc<Site>)) {
	if let Some(site) = site.upgrade() {
		f(&site);
	}
}

/// JSON text of a board document handed over from script: strings pass
/// through, objects are serialised.
pub fn board_json(data: &JsValue) -> Option<String> {
	if let Some(text) = data.as_string() {
		return Some(text);
	}
	if data.is_undefined() || data.is_null() {
		return None;
	}
	js_sys::JSON::stringify(data).ok().and_then(|s| s.as_string())
}

/// Toggle the enlarged local graph.
pub fn toggle_graph_expand() {
	if let Some(wrapper) = dom::html_element_by_id(LOCAL_WRAPPER_ID) {
		let _ = wrapper.class_list().toggle("expanded");
	}
}
