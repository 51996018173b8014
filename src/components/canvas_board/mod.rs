//! JSON Canvas board: scene building, edge geometry, viewport control and
//! the mounted view.

mod component;
pub mod edge;
pub mod note;
pub mod scene;
pub mod types;
pub mod viewport;

use std::any::Any;

use leptos::mount::mount_to;
use leptos::prelude::*;
use log::info;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

pub use component::CanvasBoard;
pub use scene::Scene;
pub use types::BoardDocument;
pub use viewport::{Viewport, ViewportController};

/// A board mounted into a host element together with its viewport
/// listeners. [`unmount`](Self::unmount) is idempotent and runs on drop.
pub struct CanvasMount {
	controller: ViewportController,
	viewport: ArcRwSignal<Viewport>,
	view: Option<Box<dyn Any>>,
}

impl CanvasMount {
	/// Replace the contents of `host` with the board for `doc` and fit it
	/// to the host's size.
	pub fn mount(host: &HtmlElement, doc: &BoardDocument) -> Result<Self, JsValue> {
		let scene = Scene::build(doc);
		let bounds = scene.bounds();
		let (node_count, edge_count) = (scene.nodes.len(), scene.edges.len());
		let viewport = ArcRwSignal::new(Viewport::default());

		host.set_inner_html("");
		let handle = mount_to(host.clone(), {
			let viewport = viewport.clone();
			move || view! { <CanvasBoard scene=scene viewport=viewport /> }
		});
		let controller = ViewportController::attach(host, viewport.clone())?;

		if let Some(bounds) = bounds {
			let (w, h) = (host.client_width() as f64, host.client_height() as f64);
			viewport.update(|v| v.fit(bounds, w, h));
		}
		info!("canvas: mounted {} nodes, {} edges", node_count, edge_count);

		Ok(Self {
			controller,
			viewport,
			view: Some(Box::new(handle)),
		})
	}

	/// Current view state.
	pub fn viewport(&self) -> Viewport {
		self.viewport.get_untracked()
	}

	pub fn is_mounted(&self) -> bool {
		self.view.is_some()
	}

	/// Detach listeners and remove the board from the page.
	pub fn unmount(&mut self) {
		self.controller.detach();
		self.view.take();
	}
}

impl Drop for CanvasMount {
	fn drop(&mut self) {
		self.unmount();
	}
}
