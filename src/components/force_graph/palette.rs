//! Graph colours taken from the active site theme.

use web_sys::CssStyleDeclaration;

/// What a graph node represents, for colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Folder,
	Page,
	Asset,
}

impl NodeKind {
	/// Classify a node's `type` field.
	pub fn from_type(kind: &str) -> Self {
		match kind {
			"folder" => Self::Folder,
			".md" | ".canvas" | ".base" => Self::Page,
			_ => Self::Asset,
		}
	}
}

/// Resolved colours for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub accent: String,
	pub text: String,
	pub page: String,
	pub link: String,
	pub folder: String,
	pub asset: String,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			accent: "#7e6df7".into(),
			text: "#ccc".into(),
			page: "#888".into(),
			link: "#999".into(),
			folder: "#FFD700".into(),
			asset: "#FF0000".into(),
		}
	}
}

fn css_var(style: &CssStyleDeclaration, name: &str, fallback: String) -> String {
	style
		.get_property_value(name)
		.ok()
		.map(|v| v.trim().to_owned())
		.filter(|v| !v.is_empty())
		.unwrap_or(fallback)
}

impl Palette {
	/// Read the theme's custom properties from the root element, keeping
	/// the defaults for any that are unset.
	pub fn from_document() -> Self {
		let defaults = Self::default();
		let Some(style) = web_sys::window().and_then(|w| {
			let root = w.document()?.document_element()?;
			w.get_computed_style(&root).ok().flatten()
		}) else {
			return defaults;
		};
		Self {
			accent: css_var(&style, "--accent-color", defaults.accent),
			text: css_var(&style, "--text-color", defaults.text),
			page: css_var(&style, "--color-comment", defaults.page),
			link: css_var(&style, "--sidebar-border", defaults.link),
			folder: css_var(&style, "--color-yellow", defaults.folder),
			asset: css_var(&style, "--color-red", defaults.asset),
		}
	}

	pub fn node_color(&self, kind: NodeKind) -> &str {
		match kind {
			NodeKind::Folder => &self.folder,
			NodeKind::Page => &self.page,
			NodeKind::Asset => &self.asset,
		}
	}
}
