use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent};

use super::layout::ForceParams;
use super::palette::Palette;
use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;
use crate::dom::Listener;

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);
const FRAME_DT: f32 = 0.016;

type Frame = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let Some(parent) = canvas.parent_element() else {
		return FALLBACK_SIZE;
	};
	let rect = parent.get_bounding_client_rect();
	let w = if rect.width() > 0.0 { rect.width() } else { FALLBACK_SIZE.0 };
	let h = if rect.height() > 0.0 { rect.height() } else { FALLBACK_SIZE.1 };
	(w, h)
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get() {
		let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

fn request_frame(frame: &Frame) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(cb) = frame.borrow().as_ref() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Canvas view of a link graph with a running force simulation.
#[component]
pub fn ForceGraphCanvas(
	data: GraphData,
	params: ForceParams,
	palette: Palette,
	/// Draw labels at full opacity, as for a page's neighbourhood.
	#[prop(default = false)]
	local: bool,
	#[prop(into, default = String::new())] base_url: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Frame = Rc::new(RefCell::new(None));
	let resize: Rc<RefCell<Option<Listener>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	on_cleanup({
		let alive = alive.clone();
		move || alive.store(false, Ordering::Relaxed)
	});

	let (state_init, animate_init, resize_init) = (state.clone(), animate.clone(), resize.clone());
	let mut data = Some(data);
	let mut palette = Some(palette);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (Some(data), Some(palette)) = (data.take(), palette.take()) else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas;
		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("graph: canvas has no 2d context");
				return;
			}
		};
		let mut graph = ForceGraphState::new(&data, params, palette, &base_url, w, h);
		graph.local = local;
		*state_init.borrow_mut() = Some(graph);

		if let Some(window) = web_sys::window() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			match Listener::new(&window, "resize", move |_| {
				let (nw, nh) = parent_size(&canvas_resize);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}) {
				Ok(listener) => *resize_init.borrow_mut() = Some(listener),
				Err(e) => warn!("graph: resize listener unavailable: {:?}", e),
			}
		}

		let (state_anim, animate_inner, resize_inner, alive) = (
			state_init.clone(),
			animate_init.clone(),
			resize_init.clone(),
			alive.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive.load(Ordering::Relaxed) {
				debug!("graph: stopping animation");
				state_anim.borrow_mut().take();
				resize_inner.borrow_mut().take();
				// Dropped once this call returns.
				animate_inner.borrow_mut().take();
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
			request_frame(&animate_inner);
		}));
		request_frame(&animate_init);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
			let over_node = s.drag.active || s.hover.node.is_some();
			set_cursor(canvas_ref, if over_node { "pointer" } else { "grab" });
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.release());
		if let Some(href) = clicked {
			if let Some(window) = web_sys::window() {
				let _ = window.location().set_href(&href);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
		set_cursor(canvas_ref, "grab");
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
