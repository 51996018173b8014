//! Light/dark theme toggle.

use log::{info, warn};
use web_sys::Document;

pub const TOGGLE_ID: &str = "theme-toggle";
pub const THEME_ATTRIBUTE: &str = "data-theme";
const STORAGE_KEY: &str = "theme";
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
	Light,
	Dark,
}

impl Theme {
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"light" => Some(Self::Light),
			"dark" => Some(Self::Dark),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	pub fn opposite(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}
}

/// Theme selected by a toggle click. With no explicit theme set the page
/// follows the system preference, so the toggle moves away from it.
pub fn next_theme(current: Option<Theme>, system_dark: bool) -> Theme {
	match current {
		Some(theme) => theme.opposite(),
		None if system_dark => Theme::Light,
		None => Theme::Dark,
	}
}

pub fn system_prefers_dark() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media(DARK_QUERY).ok().flatten())
		.is_some_and(|mq| mq.matches())
}

/// Flip the document theme and persist the choice.
pub fn toggle(document: &Document) {
	let Some(root) = document.document_element() else {
		return;
	};
	let current = root
		.get_attribute(THEME_ATTRIBUTE)
		.and_then(|v| Theme::parse(&v));
	let next = next_theme(current, system_prefers_dark());
	if let Err(e) = root.set_attribute(THEME_ATTRIBUTE, next.as_str()) {
		warn!("theme: could not set attribute: {:?}", e);
		return;
	}
	if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
		let _ = storage.set_item(STORAGE_KEY, next.as_str());
	}
	info!("theme: switched to {}", next.as_str());
}
