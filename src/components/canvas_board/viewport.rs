//! Pan/zoom view over the board world layer.
//!
//! [`Viewport`] is the pure gesture state machine; [`ViewportController`]
//! feeds it from browser mouse, wheel and touch events and owns every
//! listener it attaches.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent, TouchEvent, TouchList, WheelEvent};

use crate::dom::{self, Listener};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;
pub const WHEEL_SENSITIVITY: f64 = 0.001;
pub const ZOOM_STEP: f64 = 0.2;
pub const FIT_PADDING: f64 = 100.0;

/// Elements that keep their own click behaviour instead of starting a pan.
pub const INTERACTIVE_SELECTOR: &str = "a, button, input, .canvas-node-header";

/// Axis-aligned box in board space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	/// Smallest box containing every `(x, y, width, height)` rect.
	pub fn enclosing(rects: impl IntoIterator<Item = (f64, f64, f64, f64)>) -> Option<Self> {
		rects.into_iter().fold(None, |acc, (x, y, w, h)| {
			Some(match acc {
				None => Self {
					min_x: x,
					min_y: y,
					max_x: x + w,
					max_y: y + h,
				},
				Some(b) => Self {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x + w),
					max_y: b.max_y.max(y + h),
				},
			})
		})
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Gesture {
	#[default]
	Idle,
	Panning {
		last_x: f64,
		last_y: f64,
	},
	Pinching {
		initial_distance: f64,
		initial_scale: f64,
	},
}

/// Uniform scale plus translation, and the gesture in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub scale: f64,
	pub pan_x: f64,
	pub pan_y: f64,
	gesture: Gesture,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scale: 1.0,
			pan_x: 0.0,
			pan_y: 0.0,
			gesture: Gesture::Idle,
		}
	}
}

fn clamp_scale(scale: f64) -> f64 {
	scale.clamp(MIN_SCALE, MAX_SCALE)
}

fn distance((ax, ay): (f64, f64), (bx, by): (f64, f64)) -> f64 {
	(ax - bx).hypot(ay - by)
}

impl Viewport {
	/// CSS transform for the world layer.
	pub fn css_transform(&self) -> String {
		format!(
			"translate({}px, {}px) scale({})",
			self.pan_x, self.pan_y, self.scale
		)
	}

	pub fn is_panning(&self) -> bool {
		matches!(self.gesture, Gesture::Panning { .. })
	}

	pub fn is_pinching(&self) -> bool {
		matches!(self.gesture, Gesture::Pinching { .. })
	}

	pub fn wheel(&mut self, delta_y: f64) {
		self.scale = clamp_scale(self.scale - delta_y * WHEEL_SENSITIVITY);
	}

	pub fn zoom_in(&mut self) {
		self.scale = clamp_scale(self.scale + ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.scale = clamp_scale(self.scale - ZOOM_STEP);
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.pan_x += dx;
		self.pan_y += dy;
	}

	/// Start a pan at pointer position `(x, y)`.
	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.gesture = Gesture::Panning { last_x: x, last_y: y };
	}

	/// Move the pointer; pans by the delta if a pan is active.
	pub fn pan_to(&mut self, x: f64, y: f64) -> bool {
		let Gesture::Panning { last_x, last_y } = self.gesture else {
			return false;
		};
		self.pan_by(x - last_x, y - last_y);
		self.gesture = Gesture::Panning { last_x: x, last_y: y };
		true
	}

	pub fn end_pan(&mut self) {
		if self.is_panning() {
			self.gesture = Gesture::Idle;
		}
	}

	/// One touch starts a pan, two start a pinch.
	pub fn touch_start(&mut self, touches: &[(f64, f64)]) {
		match *touches {
			[(x, y)] => self.begin_pan(x, y),
			[a, b] => {
				self.gesture = Gesture::Pinching {
					initial_distance: distance(a, b),
					initial_scale: self.scale,
				}
			}
			_ => {}
		}
	}

	/// Returns whether the move was consumed (and page scrolling should be
	/// suppressed).
	pub fn touch_move(&mut self, touches: &[(f64, f64)]) -> bool {
		match (touches, self.gesture) {
			(&[(x, y)], Gesture::Panning { .. }) => self.pan_to(x, y),
			(
				&[a, b],
				Gesture::Pinching {
					initial_distance,
					initial_scale,
				},
			) if initial_distance > 0.0 => {
				self.scale = clamp_scale(initial_scale * (distance(a, b) / initial_distance));
				true
			}
			_ => false,
		}
	}

	pub fn touch_end(&mut self, remaining: u32) {
		if remaining == 0 {
			self.gesture = Gesture::Idle;
		}
	}

	/// Fit `bounds` inside a `view_width` x `view_height` viewport with
	/// [`FIT_PADDING`] on every side, never zooming past 1:1, and centre it.
	pub fn fit(&mut self, bounds: Bounds, view_width: f64, view_height: f64) {
		let scale_x = (view_width - FIT_PADDING * 2.0) / bounds.width();
		let scale_y = (view_height - FIT_PADDING * 2.0) / bounds.height();
		let scale = scale_x.min(scale_y).min(1.0);
		self.scale = if scale.is_nan() { 1.0 } else { scale.max(MIN_SCALE) };
		self.pan_x = (view_width - bounds.width() * self.scale) / 2.0 - bounds.min_x * self.scale;
		self.pan_y = (view_height - bounds.height() * self.scale) / 2.0 - bounds.min_y * self.scale;
	}
}

fn touch_points(list: &TouchList) -> Vec<(f64, f64)> {
	(0..list.length())
		.filter_map(|i| list.get(i))
		.map(|t| (t.client_x() as f64, t.client_y() as f64))
		.collect()
}

fn set_cursor(el: &HtmlElement, cursor: &str) {
	let _ = el.style().set_property("cursor", cursor);
}

/// Browser wiring for a [`Viewport`] signal. Dropping it (or calling
/// [`detach`](Self::detach)) removes every listener it added.
pub struct ViewportController {
	listeners: Vec<Listener>,
}

impl ViewportController {
	/// Listen on `host` for wheel, mouse-down and touch-start, and on the
	/// window for the move/up/end halves of each gesture.
	pub fn attach(host: &HtmlElement, viewport: ArcRwSignal<Viewport>) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let mut listeners = Vec::with_capacity(7);

		let vp = viewport.clone();
		listeners.push(Listener::active(host, "wheel", move |ev: Event| {
			let Some(ev) = ev.dyn_ref::<WheelEvent>() else {
				return;
			};
			ev.prevent_default();
			vp.update(|v| v.wheel(ev.delta_y()));
		})?);

		let (vp, cursor_host) = (viewport.clone(), host.clone());
		listeners.push(Listener::new(host, "mousedown", move |ev: Event| {
			if dom::target_within(&ev, INTERACTIVE_SELECTOR) {
				return;
			}
			let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			vp.update(|v| v.begin_pan(ev.client_x() as f64, ev.client_y() as f64));
			set_cursor(&cursor_host, "grabbing");
		})?);

		let vp = viewport.clone();
		listeners.push(Listener::new(&window, "mousemove", move |ev: Event| {
			if !vp.with_untracked(Viewport::is_panning) {
				return;
			}
			let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			ev.prevent_default();
			vp.update(|v| {
				v.pan_to(ev.client_x() as f64, ev.client_y() as f64);
			});
		})?);

		let (vp, cursor_host) = (viewport.clone(), host.clone());
		listeners.push(Listener::new(&window, "mouseup", move |_| {
			if vp.with_untracked(Viewport::is_panning) {
				vp.update(Viewport::end_pan);
			}
			set_cursor(&cursor_host, "default");
		})?);

		let vp = viewport.clone();
		listeners.push(Listener::active(host, "touchstart", move |ev: Event| {
			if dom::target_within(&ev, INTERACTIVE_SELECTOR) {
				return;
			}
			let Some(ev) = ev.dyn_ref::<TouchEvent>() else {
				return;
			};
			let points = touch_points(&ev.touches());
			vp.update(|v| v.touch_start(&points));
		})?);

		let vp = viewport.clone();
		listeners.push(Listener::active(&window, "touchmove", move |ev: Event| {
			let Some(ev) = ev.dyn_ref::<TouchEvent>() else {
				return;
			};
			if vp.with_untracked(|v| !v.is_panning() && !v.is_pinching()) {
				return;
			}
			let points = touch_points(&ev.touches());
			if vp.try_update(|v| v.touch_move(&points)).unwrap_or(false) {
				ev.prevent_default();
			}
		})?);

		let vp = viewport;
		listeners.push(Listener::new(&window, "touchend", move |ev: Event| {
			let Some(ev) = ev.dyn_ref::<TouchEvent>() else {
				return;
			};
			let remaining = ev.touches().length();
			vp.update(|v| v.touch_end(remaining));
		})?);

		Ok(Self { listeners })
	}

	/// Remove all listeners. Safe to call more than once.
	pub fn detach(&mut self) {
		self.listeners.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn in_bounds(v: &Viewport) -> bool {
		(MIN_SCALE..=MAX_SCALE).contains(&v.scale)
	}

	#[test]
	fn zoom_sequences_stay_in_bounds() {
		let mut v = Viewport::default();
		for _ in 0..100 {
			v.wheel(-500.0);
			assert!(in_bounds(&v));
		}
		assert_eq!(v.scale, MAX_SCALE);
		for _ in 0..100 {
			v.zoom_out();
			assert!(in_bounds(&v));
		}
		assert_eq!(v.scale, MIN_SCALE);
		for _ in 0..40 {
			v.zoom_in();
			assert!(in_bounds(&v));
		}
		assert_eq!(v.scale, MAX_SCALE);
	}

	#[test]
	fn wheel_scales_by_delta() {
		let mut v = Viewport::default();
		v.wheel(100.0);
		assert!((v.scale - 0.9).abs() < 1e-9);
		v.wheel(-300.0);
		assert!((v.scale - 1.2).abs() < 1e-9);
	}

	#[test]
	fn pan_then_inverse_restores_origin() {
		let mut v = Viewport::default();
		v.pan_by(13.5, -7.25);
		v.pan_by(-40.0, 2.0);
		v.pan_by(40.0, -2.0);
		v.pan_by(-13.5, 7.25);
		assert_eq!((v.pan_x, v.pan_y), (0.0, 0.0));
	}

	#[test]
	fn mouse_drag_accumulates_deltas() {
		let mut v = Viewport::default();
		assert!(!v.pan_to(10.0, 10.0));
		v.begin_pan(100.0, 100.0);
		assert!(v.pan_to(110.0, 95.0));
		assert!(v.pan_to(130.0, 90.0));
		assert_eq!((v.pan_x, v.pan_y), (30.0, -10.0));
		v.end_pan();
		assert!(!v.is_panning());
		assert!(!v.pan_to(500.0, 500.0));
		assert_eq!((v.pan_x, v.pan_y), (30.0, -10.0));
	}

	#[test]
	fn pinch_scales_relative_to_start() {
		let mut v = Viewport::default();
		v.zoom_in();
		v.touch_start(&[(0.0, 0.0), (100.0, 0.0)]);
		assert!(v.is_pinching());
		assert!(v.touch_move(&[(0.0, 0.0), (150.0, 0.0)]));
		assert!((v.scale - 1.8).abs() < 1e-9);
		assert!(v.touch_move(&[(0.0, 0.0), (0.0, 1.0)]));
		assert_eq!(v.scale, MIN_SCALE);
		assert!(v.touch_move(&[(0.0, 0.0), (10_000.0, 0.0)]));
		assert_eq!(v.scale, MAX_SCALE);
		v.touch_end(1);
		assert!(v.is_pinching());
		v.touch_end(0);
		assert!(!v.is_pinching());
	}

	#[test]
	fn single_touch_pans() {
		let mut v = Viewport::default();
		v.touch_start(&[(10.0, 10.0)]);
		assert!(v.touch_move(&[(15.0, 30.0)]));
		assert_eq!((v.pan_x, v.pan_y), (5.0, 20.0));
		assert!(!v.touch_move(&[(1.0, 1.0), (2.0, 2.0)]));
		v.touch_end(0);
		assert!(!v.touch_move(&[(50.0, 50.0)]));
	}

	#[test]
	fn fit_binds_on_tighter_axis() {
		let bounds = Bounds::enclosing([(0.0, 0.0, 1000.0, 200.0), (500.0, 300.0, 100.0, 100.0)]).unwrap();
		assert_eq!(bounds, Bounds { min_x: 0.0, min_y: 0.0, max_x: 1000.0, max_y: 400.0 });

		let mut v = Viewport::default();
		v.fit(bounds, 800.0, 600.0);
		// (800 - 200) / 1000 = 0.6 vs (600 - 200) / 400 = 1.0
		assert!((v.scale - 0.6).abs() < 1e-9);
		assert!(bounds.width() * v.scale <= 800.0 - 2.0 * FIT_PADDING + 1e-9);
		assert!((v.pan_x - 100.0).abs() < 1e-9);
		assert!((v.pan_y - 180.0).abs() < 1e-9);
	}

	#[test]
	fn fit_never_magnifies() {
		let bounds = Bounds::enclosing([(-50.0, -50.0, 100.0, 100.0)]).unwrap();
		let mut v = Viewport::default();
		v.fit(bounds, 1920.0, 1080.0);
		assert_eq!(v.scale, 1.0);
		assert_eq!((v.pan_x, v.pan_y), (960.0, 540.0));
	}

	#[test]
	fn fit_in_tiny_viewport_keeps_minimum_scale() {
		let bounds = Bounds::enclosing([(0.0, 0.0, 100.0, 100.0)]).unwrap();
		let mut v = Viewport::default();
		v.fit(bounds, 150.0, 150.0);
		assert_eq!(v.scale, MIN_SCALE);
	}

	#[test]
	fn empty_rects_have_no_bounds() {
		assert!(Bounds::enclosing(std::iter::empty()).is_none());
	}

	#[test]
	fn css_transform_format() {
		let mut v = Viewport::default();
		v.pan_by(12.0, -4.5);
		assert_eq!(v.css_transform(), "translate(12px, -4.5px) scale(1)");
	}
}
