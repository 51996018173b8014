//! Cubic edge geometry between two board nodes.

use super::types::{BoardEdge, BoardNode, Side};

/// How far control points are pulled out from a sided anchor.
pub const CURVATURE: f64 = 100.0;
/// Stroke used when an edge carries no colour.
pub const DEFAULT_STROKE: &str = "#999";

/// A point in board space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// A ready-to-draw SVG edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePath {
	/// SVG path data.
	pub d: String,
	pub stroke: String,
}

/// Midpoint of `side`, or the node centre when no side is given.
pub fn anchor_point(node: &BoardNode, side: Option<Side>) -> Point {
	let center = Point {
		x: node.x + node.width / 2.0,
		y: node.y + node.height / 2.0,
	};
	match side {
		Some(Side::Top) => Point { y: node.y, ..center },
		Some(Side::Bottom) => Point {
			y: node.y + node.height,
			..center
		},
		Some(Side::Left) => Point { x: node.x, ..center },
		Some(Side::Right) => Point {
			x: node.x + node.width,
			..center
		},
		Some(Side::Other) | None => center,
	}
}

/// Push `point` outward in the direction `side` faces.
pub fn control_point(point: Point, side: Option<Side>) -> Point {
	match side {
		Some(Side::Top) => Point {
			y: point.y - CURVATURE,
			..point
		},
		Some(Side::Bottom) => Point {
			y: point.y + CURVATURE,
			..point
		},
		Some(Side::Left) => Point {
			x: point.x - CURVATURE,
			..point
		},
		Some(Side::Right) => Point {
			x: point.x + CURVATURE,
			..point
		},
		Some(Side::Other) | None => point,
	}
}

/// Build the path for `edge`. `None` if either endpoint is unknown.
pub fn edge_path<'n>(
	edge: &BoardEdge,
	lookup: impl Fn(&str) -> Option<&'n BoardNode>,
) -> Option<EdgePath> {
	let from = lookup(&edge.from_node)?;
	let to = lookup(&edge.to_node)?;

	let start = anchor_point(from, edge.from_side);
	let end = anchor_point(to, edge.to_side);
	let cp1 = control_point(start, edge.from_side);
	let cp2 = control_point(end, edge.to_side);

	Some(EdgePath {
		d: format!(
			"M {} {} C {} {}, {} {}, {} {}",
			start.x, start.y, cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y
		),
		stroke: edge.color.clone().unwrap_or_else(|| DEFAULT_STROKE.to_owned()),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::canvas_board::types::NodeType;

	fn node(id: &str, x: f64, y: f64) -> BoardNode {
		BoardNode {
			id: id.into(),
			node_type: NodeType::Text,
			x,
			y,
			width: 100.0,
			height: 50.0,
			color: None,
			text: None,
			file: None,
			html_content: None,
			is_image: false,
			src: None,
			url: None,
			label: None,
		}
	}

	fn edge(from: &str, to: &str, from_side: Option<Side>, to_side: Option<Side>) -> BoardEdge {
		BoardEdge {
			id: None,
			from_node: from.into(),
			to_node: to.into(),
			from_side,
			to_side,
			color: None,
		}
	}

	#[test]
	fn anchors_on_side_midpoints() {
		let n = node("a", 10.0, 20.0);
		assert_eq!(anchor_point(&n, None), Point { x: 60.0, y: 45.0 });
		assert_eq!(anchor_point(&n, Some(Side::Top)), Point { x: 60.0, y: 20.0 });
		assert_eq!(anchor_point(&n, Some(Side::Bottom)), Point { x: 60.0, y: 70.0 });
		assert_eq!(anchor_point(&n, Some(Side::Left)), Point { x: 10.0, y: 45.0 });
		assert_eq!(anchor_point(&n, Some(Side::Right)), Point { x: 110.0, y: 45.0 });
		assert_eq!(anchor_point(&n, Some(Side::Other)), Point { x: 60.0, y: 45.0 });
	}

	#[test]
	fn bottom_exit_pulls_control_point_down() {
		let p = Point { x: 5.0, y: 5.0 };
		assert_eq!(control_point(p, Some(Side::Bottom)), Point { x: 5.0, y: 105.0 });
		assert_eq!(control_point(p, Some(Side::Left)), Point { x: -95.0, y: 5.0 });
		assert_eq!(control_point(p, None), p);
	}

	#[test]
	fn builds_cubic_path() {
		let nodes = [node("a", 0.0, 0.0), node("b", 300.0, 0.0)];
		let lookup = |id: &str| nodes.iter().find(|n| n.id == id);

		let path = edge_path(&edge("a", "b", Some(Side::Right), Some(Side::Left)), lookup).unwrap();
		assert_eq!(path.d, "M 100 25 C 200 25, 200 25, 300 25");
		assert_eq!(path.stroke, DEFAULT_STROKE);

		let mut coloured = edge("a", "b", None, None);
		coloured.color = Some("#f00".into());
		let path = edge_path(&coloured, lookup).unwrap();
		assert_eq!(path.d, "M 50 25 C 50 25, 350 25, 350 25");
		assert_eq!(path.stroke, "#f00");
	}

	#[test]
	fn missing_endpoint_yields_nothing() {
		let nodes = [node("a", 0.0, 0.0)];
		let lookup = |id: &str| nodes.iter().find(|n| n.id == id);
		assert!(edge_path(&edge("a", "ghost", None, None), lookup).is_none());
		assert!(edge_path(&edge("ghost", "a", None, None), lookup).is_none());
	}
}
