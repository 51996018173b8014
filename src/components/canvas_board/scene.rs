//! Board document to an ordered, render-ready scene.

use super::edge::{EdgePath, edge_path};
use super::note;
use super::types::{BoardDocument, BoardNode, NodeType};
use super::viewport::Bounds;
use crate::markdown;
use crate::slug::strip_md_extension;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Floating header above note, file and link cards.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
	pub title: String,
	pub href: String,
}

/// Where a markdown card's body comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum NoteBody {
	/// Rendered by the generator and embedded in the document.
	Inline(String),
	/// Fetched at runtime from the first of these URLs that answers.
	Remote(Vec<String>),
}

/// What goes inside a node element, one variant per rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeContent {
	Group { label: Option<String> },
	Text { html: String },
	Image { src: String, alt: String },
	Note { header: Header, body: NoteBody },
	File { header: Header, name: String },
	Link { url: String },
	Empty,
}

/// A positioned node ready for the view.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: String,
	pub node_type: NodeType,
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	pub color: Option<String>,
	pub content: NodeContent,
}

/// Everything needed to draw one board.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	/// Groups first, then every other node, each in document order.
	pub nodes: Vec<SceneNode>,
	pub edges: Vec<EdgePath>,
}

fn is_image_file(file: &str) -> bool {
	file.rsplit_once('.')
		.is_some_and(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

fn is_markdown_file(file: &str) -> bool {
	strip_md_extension(file).len() != file.len()
}

fn file_content(node: &BoardNode) -> NodeContent {
	let file = node.file.clone().unwrap_or_default();
	if node.is_image || is_image_file(&file) {
		return NodeContent::Image {
			src: node.src.clone().unwrap_or_else(|| file.clone()),
			alt: file,
		};
	}

	let title = strip_md_extension(&file).to_owned();
	let header = Header {
		href: note::note_href(&title),
		title,
	};
	if let Some(html) = &node.html_content {
		NodeContent::Note {
			header,
			body: NoteBody::Inline(html.clone()),
		}
	} else if is_markdown_file(&file) {
		NodeContent::Note {
			header,
			body: NoteBody::Remote(note::note_candidates(&file)),
		}
	} else {
		NodeContent::File { header, name: file }
	}
}

impl SceneNode {
	fn from_board(node: &BoardNode) -> Self {
		let content = match node.node_type {
			NodeType::Group => NodeContent::Group {
				label: node.label.clone(),
			},
			NodeType::Text => NodeContent::Text {
				html: markdown::to_html(node.text.as_deref().unwrap_or_default()),
			},
			NodeType::File => file_content(node),
			NodeType::Link => NodeContent::Link {
				url: node.url.clone().unwrap_or_default(),
			},
			NodeType::Unknown => NodeContent::Empty,
		};
		Self {
			id: node.id.clone(),
			node_type: node.node_type,
			x: node.x,
			y: node.y,
			width: node.width,
			height: node.height,
			color: node.color.clone(),
			content,
		}
	}

	pub fn dom_id(&self) -> String {
		format!("node-{}", self.id)
	}

	pub fn class(&self) -> String {
		match &self.color {
			Some(color) => format!("node {} color-{}", self.node_type.as_str(), color),
			None => format!("node {}", self.node_type.as_str()),
		}
	}

	/// Inline style: geometry, per-kind chrome and the colour variable.
	pub fn style(&self) -> String {
		let mut style = format!(
			"left: {}px; top: {}px; width: {}px; height: {}px;",
			self.x, self.y, self.width, self.height
		);
		let chrome = match self.content {
			NodeContent::Image { .. } => " border: none; background: transparent; box-shadow: none;",
			NodeContent::Note { .. } | NodeContent::File { .. } | NodeContent::Link { .. } => {
				" overflow: visible; background: transparent; box-shadow: none; border: none;"
			}
			NodeContent::Group { .. } => {
				" background-color: rgba(0,0,0,0.02); border: 2px dashed rgba(0,0,0,0.1); pointer-events: none;"
			}
			NodeContent::Text { .. } | NodeContent::Empty => "",
		};
		style.push_str(chrome);
		if let Some(color) = &self.color {
			style.push_str(&format!(" --node-color: {color};"));
		}
		style
	}
}

impl Scene {
	/// Build the scene for `doc`. Edges whose endpoints are missing are
	/// left out.
	pub fn build(doc: &BoardDocument) -> Self {
		let (groups, others): (Vec<&BoardNode>, Vec<&BoardNode>) =
			doc.nodes.iter().partition(|n| n.node_type == NodeType::Group);
		let nodes = groups
			.into_iter()
			.chain(others)
			.map(SceneNode::from_board)
			.collect();
		let edges = doc
			.edges
			.iter()
			.filter_map(|edge| edge_path(edge, |id| doc.node(id)))
			.collect();
		Self { nodes, edges }
	}

	/// Extent of every node, or `None` for an empty board.
	pub fn bounds(&self) -> Option<Bounds> {
		Bounds::enclosing(self.nodes.iter().map(|n| (n.x, n.y, n.width, n.height)))
	}
}
