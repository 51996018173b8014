//! Site-level settings injected by the page generator.

use log::warn;
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::dom;

/// Id of the `<script type="application/json">` element carrying the config.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Settings read once at startup.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
	/// Path prefix the site is served under, without a trailing slash.
	pub base_url: String,
	/// Skip the per-page local graph entirely.
	pub disable_local_graph: bool,
}

impl SiteConfig {
	/// Parse a config document, normalising the base URL.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let mut config: Self = serde_json::from_str(json)?;
		config.base_url = config.base_url.trim_end_matches('/').to_owned();
		Ok(config)
	}

	/// Read the config element from the current document, falling back to
	/// defaults when it is absent or malformed.
	pub fn from_document() -> Self {
		let Some(text) = dom::document()
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
			.and_then(|script| script.text().ok())
		else {
			return Self::default();
		};
		Self::from_json(&text).unwrap_or_else(|e| {
			warn!("site-canvas: ignoring malformed site config: {}", e);
			Self::default()
		})
	}

	/// Location of the link-graph document.
	pub fn graph_url(&self) -> String {
		format!("{}/graph.json", self.base_url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_fall_back_to_defaults() {
		let config = SiteConfig::from_json("{}").unwrap();
		assert_eq!(config, SiteConfig::default());
		assert_eq!(config.graph_url(), "/graph.json");
	}

	#[test]
	fn base_url_loses_trailing_slash() {
		let config =
			SiteConfig::from_json(r#"{"baseUrl": "/docs/", "disableLocalGraph": true}"#).unwrap();
		assert_eq!(config.base_url, "/docs");
		assert!(config.disable_local_graph);
		assert_eq!(config.graph_url(), "/docs/graph.json");
	}

	#[test]
	fn rejects_non_object() {
		assert!(SiteConfig::from_json("[1, 2]").is_err());
	}
}
