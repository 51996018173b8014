//! Error type shared by the fetch and parse paths.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Why a document or fragment could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
	/// No `window` (running outside a browser).
	#[error("no browser window available")]
	NoWindow,
	/// The server answered with a non-success status.
	#[error("GET {url} returned HTTP {status}")]
	Status {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},
	/// JSON payload did not match the expected shape.
	#[error("malformed document: {0}")]
	Parse(#[from] serde_json::Error),
	/// A fetched page had no `#content` region.
	#[error("{0} has no content region")]
	MissingContent(String),
	/// A browser API rejected or threw.
	#[error("browser error: {0}")]
	Js(String),
}

impl From<JsValue> for LoadError {
	fn from(value: JsValue) -> Self {
		let message = value
			.as_string()
			.or_else(|| {
				value
					.dyn_ref::<js_sys::Error>()
					.map(|e| String::from(e.message()))
			})
			.unwrap_or_else(|| format!("{value:?}"));
		Self::Js(message)
	}
}
