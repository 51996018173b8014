//! JSON Canvas board document as emitted by the page generator.

use serde::Deserialize;

/// Declared kind of a board node.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	/// Markdown card.
	Text,
	/// Reference to a vault file (note, image or other).
	File,
	/// Embedded web page.
	Link,
	/// Labelled backdrop grouping other nodes.
	Group,
	#[serde(other)]
	/// Anything newer than this renderer understands.
	Unknown,
}

impl NodeType {
	/// Class name used on the node element.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::File => "file",
			Self::Link => "link",
			Self::Group => "group",
			Self::Unknown => "unknown",
		}
	}
}

/// Side of a node an edge attaches to.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	/// Top edge midpoint.
	Top,
	/// Bottom edge midpoint.
	Bottom,
	/// Left edge midpoint.
	Left,
	/// Right edge midpoint.
	Right,
	/// Unrecognised side, treated as no side.
	#[serde(other)]
	Other,
}

/// A positioned board node. `x`/`y` is the top-left corner in board pixels.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardNode {
	pub id: String,
	#[serde(rename = "type")]
	pub node_type: NodeType,
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub text: Option<String>,
	#[serde(default)]
	pub file: Option<String>,
	/// Rendered markdown injected at build time.
	#[serde(default)]
	pub html_content: Option<String>,
	#[serde(default)]
	pub is_image: bool,
	/// Web path of an image, when it differs from `file`.
	#[serde(default)]
	pub src: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub label: Option<String>,
}

/// A directed connection between two nodes.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardEdge {
	#[serde(default)]
	pub id: Option<String>,
	pub from_node: String,
	pub to_node: String,
	#[serde(default)]
	pub from_side: Option<Side>,
	#[serde(default)]
	pub to_side: Option<Side>,
	#[serde(default)]
	pub color: Option<String>,
}

/// A whole board: nodes plus edges.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BoardDocument {
	#[serde(default)]
	pub nodes: Vec<BoardNode>,
	#[serde(default)]
	pub edges: Vec<BoardEdge>,
}

impl BoardDocument {
	/// Parse a board document from its JSON text.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&BoardNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_generator_output() {
		let doc = BoardDocument::from_json(
			r#"{
				"nodes": [
					{"id": "a", "type": "file", "file": "Notes/Intro.md", "x": 0, "y": 0,
					 "width": 400, "height": 300, "htmlContent": "<p>hi</p>"},
					{"id": "b", "type": "file", "file": "pic.PNG", "isImage": true,
					 "src": "/pic.png", "x": 500, "y": 0, "width": 200, "height": 200, "color": "4"},
					{"id": "c", "type": "sticker", "x": 0, "y": 0, "width": 1, "height": 1}
				],
				"edges": [
					{"id": "e", "fromNode": "a", "toNode": "b", "fromSide": "right", "toSide": "middle"}
				]
			}"#,
		)
		.unwrap();

		assert_eq!(doc.nodes.len(), 3);
		assert_eq!(doc.nodes[0].html_content.as_deref(), Some("<p>hi</p>"));
		assert!(doc.nodes[1].is_image);
		assert_eq!(doc.nodes[1].color.as_deref(), Some("4"));
		assert_eq!(doc.nodes[2].node_type, NodeType::Unknown);
		assert_eq!(doc.edges[0].from_side, Some(Side::Right));
		assert_eq!(doc.edges[0].to_side, Some(Side::Other));
		assert_eq!(doc.node("b").map(|n| n.x), Some(500.0));
	}

	#[test]
	fn missing_edges_is_empty() {
		let doc = BoardDocument::from_json(r#"{"nodes": []}"#).unwrap();
		assert!(doc.edges.is_empty());
	}
}
