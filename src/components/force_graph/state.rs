use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::layout::{self, Body, ForceParams};
use super::palette::{NodeKind, Palette};
use super::types::GraphData;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
/// Pointer travel (screen px) below which a press counts as a click.
pub const CLICK_SLOP: f64 = 3.0;
/// Hovered nodes grow by this factor.
pub const HOVER_GROWTH: f64 = 1.2;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub kind: Option<NodeKind>,
	pub href: String,
	pub radius: f64,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub palette: Palette,
	pub width: f64,
	pub height: f64,
	/// Local views draw every label at full opacity.
	pub local: bool,
	params: ForceParams,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(
		data: &GraphData,
		params: ForceParams,
		palette: Palette,
		base_url: &str,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(params.simulation());
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					kind: Some(NodeKind::from_type(&node.kind)),
					href: layout::node_href(base_url, &node.url),
					radius: layout::node_radius(node.degree),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			params,
			palette,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			local: false,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if dx.hypot(dy) <= node.data.user_data.radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn position_of(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x(), node.y()));
			}
		});
		pos
	}

	pub fn href_of(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut href = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				href = Some(node.data.user_data.href.clone());
			}
		});
		href
	}

	fn set_pinned(&mut self, idx: DefaultNodeIdx, pinned: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = pinned;
			}
		});
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
	}

	/// Whether a link touches the hovered node.
	pub fn is_incident(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> bool {
		self.is_hovered(a) || self.is_hovered(b)
	}

	/// Press at screen position `(x, y)`: grab and pin a node, or start a
	/// background pan.
	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			let (nx, ny) = self.position_of(idx).unwrap_or_default();
			self.drag = DragState {
				active: true,
				moved: false,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: nx,
				node_start_y: ny,
			};
			self.set_pinned(idx, true);
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Pointer moved to `(x, y)`: drag, pan or update the hover target.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (sdx, sdy) = (x - self.drag.start_x, y - self.drag.start_y);
			if sdx.hypot(sdy) >= CLICK_SLOP {
				self.drag.moved = true;
			}
			let (nx, ny) = (
				self.drag.node_start_x + (sdx / self.transform.k) as f32,
				self.drag.node_start_y + (sdy / self.transform.k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Pointer released. Unpins a dragged node; returns the node's page if
	/// the press never moved far enough to be a drag.
	pub fn release(&mut self) -> Option<String> {
		let mut clicked = None;
		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			self.set_pinned(idx, false);
			if !self.drag.moved {
				clicked = self.href_of(idx).filter(|href| !href.is_empty());
			}
		}
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	/// Pointer left the canvas: cancel gestures and clear the highlight.
	pub fn leave(&mut self) {
		if let Some(idx) = self.drag.node_idx {
			self.set_pinned(idx, false);
		}
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Zoom by `factor` keeping screen point `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.settle();
	}

	/// Centre the layout in the canvas and resolve node overlaps.
	fn settle(&mut self) {
		let pad = self.params.collide_padding;
		let mut order = Vec::new();
		let mut bodies = Vec::new();
		self.graph.visit_nodes(|node| {
			order.push(node.index());
			bodies.push(Body {
				x: node.x() as f64,
				y: node.y() as f64,
				radius: node.data.user_data.radius + pad,
				pinned: node.data.is_anchor,
			});
		});
		let offsets: HashMap<DefaultNodeIdx, (f64, f64)> = order
			.into_iter()
			.zip(layout::settle(&bodies, (self.width / 2.0, self.height / 2.0)))
			.collect();
		self.graph.visit_nodes_mut(|node| {
			if let Some(&(dx, dy)) = offsets.get(&node.index()) {
				node.data.x += dx as f32;
				node.data.y += dy as f32;
			}
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn data() -> GraphData {
		let node = |id: &str| GraphNode {
			id: id.into(),
			label: id.into(),
			kind: ".md".into(),
			url: format!("notes/{id}"),
			degree: 0,
		};
		let link = |s: &str, t: &str| GraphLink {
			source: s.into(),
			target: t.into(),
		};
		GraphData {
			nodes: vec![node("a"), node("b"), node("c")],
			links: vec![link("a", "b"), link("b", "c")],
		}
		.prepare()
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(
			&data(),
			ForceParams::global(),
			Palette::default(),
			"/docs",
			400.0,
			400.0,
		)
	}

	fn index_of(s: &ForceGraphState, label: &str) -> DefaultNodeIdx {
		let mut found = None;
		s.graph.visit_nodes(|n| {
			if n.data.user_data.label == label {
				found = Some(n.index());
			}
		});
		found.unwrap()
	}

	fn screen_pos(s: &ForceGraphState, idx: DefaultNodeIdx) -> (f64, f64) {
		let (x, y) = s.position_of(idx).unwrap();
		(
			x as f64 * s.transform.k + s.transform.x,
			y as f64 * s.transform.k + s.transform.y,
		)
	}

	#[test]
	fn radius_follows_degree() {
		let s = state();
		let b = index_of(&s, "b");
		let mut radius = 0.0;
		s.graph.visit_nodes(|n| {
			if n.index() == b {
				radius = n.data.user_data.radius;
			}
		});
		assert!((radius - (4.0 + 2.0_f64.sqrt() * 2.0)).abs() < 1e-9);
	}

	#[test]
	fn hover_collects_neighbours() {
		let mut s = state();
		let (a, b, c) = (index_of(&s, "a"), index_of(&s, "b"), index_of(&s, "c"));
		s.set_hover(Some(b));
		assert!(s.hover.neighbors.contains(&a));
		assert!(s.hover.neighbors.contains(&c));
		assert!(s.is_incident(a, b));
		assert!(!s.is_incident(a, c));
		s.set_hover(None);
		assert!(s.hover.neighbors.is_empty());
	}

	#[test]
	fn click_without_movement_navigates() {
		let mut s = state();
		let a = index_of(&s, "a");
		let (x, y) = screen_pos(&s, a);
		s.press(x, y);
		assert!(s.drag.active);
		s.pointer_move(x + 1.0, y);
		assert_eq!(s.release().as_deref(), Some("/docs/notes/a"));
	}

	#[test]
	fn drag_pins_then_releases() {
		let mut s = state();
		let c = index_of(&s, "c");
		let (x, y) = screen_pos(&s, c);
		s.press(x, y);
		let mut pinned = false;
		s.graph.visit_nodes(|n| {
			if n.index() == c {
				pinned = n.data.is_anchor;
			}
		});
		assert!(pinned);

		s.pointer_move(x + 40.0, y + 10.0);
		let (nx, ny) = s.position_of(c).unwrap();
		assert!((nx as f64 - (x + 40.0)).abs() < 1e-3);
		assert!((ny as f64 - (y + 10.0)).abs() < 1e-3);
		assert_eq!(s.release(), None);

		s.graph.visit_nodes(|n| {
			if n.index() == c {
				pinned = n.data.is_anchor;
			}
		});
		assert!(!pinned);
	}

	#[test]
	fn background_press_pans() {
		let mut s = state();
		s.press(-500.0, -500.0);
		assert!(s.pan.active);
		s.pointer_move(-480.0, -490.0);
		assert_eq!((s.transform.x, s.transform.y), (20.0, 10.0));
		assert_eq!(s.release(), None);
		assert!(!s.pan.active);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..100 {
			s.zoom_at(200.0, 200.0, 1.1);
		}
		assert_eq!(s.transform.k, MAX_ZOOM);
		for _ in 0..100 {
			s.zoom_at(200.0, 200.0, 0.9);
		}
		assert_eq!(s.transform.k, MIN_ZOOM);
	}

	fn centroid(s: &ForceGraphState) -> (f64, f64) {
		let (mut sx, mut sy, mut n) = (0.0, 0.0, 0.0);
		s.graph.visit_nodes(|node| {
			sx += node.x() as f64;
			sy += node.y() as f64;
			n += 1.0;
		});
		(sx / n, sy / n)
	}

	#[test]
	fn ticking_keeps_layout_centred() {
		let mut s = state();
		for _ in 0..30 {
			s.tick(0.016);
		}
		let (cx, cy) = centroid(&s);
		assert!((cx - 200.0).abs() < 1.0);
		assert!((cy - 200.0).abs() < 1.0);
	}

	#[test]
	fn resize_moves_the_centre() {
		let mut s = state();
		s.resize(1000.0, 600.0);
		assert_eq!((s.width, s.height), (1000.0, 600.0));
		for _ in 0..5 {
			s.tick(0.016);
		}
		let (cx, cy) = centroid(&s);
		assert!((cx - 500.0).abs() < 1.0);
		assert!((cy - 300.0).abs() < 1.0);
	}
}
