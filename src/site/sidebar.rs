//! Marks the sidebar link for the current page.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDetailsElement};

const LINK_SELECTOR: &str = "#left-sidebar a";
pub const ACTIVE_CLASS: &str = "text-accent";

/// Comparable form of a path or href: percent-decoded, without a trailing
/// slash (the root `/` is kept).
pub fn normalize_path(path: &str) -> String {
	let decoded = urlencoding::decode(path)
		.map(|p| p.into_owned())
		.unwrap_or_else(|_| path.to_owned());
	match decoded.strip_suffix('/') {
		Some(trimmed) if !trimmed.is_empty() => trimmed.to_owned(),
		_ => decoded,
	}
}

/// Highlight the first sidebar link pointing at `pathname` and expand the
/// folders around it. Any previous highlight is cleared.
pub fn highlight(document: &Document, pathname: &str) {
	let Ok(links) = document.query_selector_all(LINK_SELECTOR) else {
		return;
	};
	let links: Vec<Element> = (0..links.length())
		.filter_map(|i| links.get(i))
		.filter_map(|n| n.dyn_into::<Element>().ok())
		.collect();
	for link in &links {
		let _ = link.class_list().remove_1(ACTIVE_CLASS);
	}

	let current = normalize_path(pathname);
	let Some(active) = links.iter().find(|link| {
		link.get_attribute("href")
			.is_some_and(|href| normalize_path(&href) == current)
	}) else {
		return;
	};
	let _ = active.class_list().add_1(ACTIVE_CLASS);
	let mut parent = active.parent_element();
	while let Some(el) = parent {
		if let Some(details) = el.dyn_ref::<HtmlDetailsElement>() {
			details.set_open(true);
		}
		parent = el.parent_element();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn trailing_slash_is_dropped() {
		assert_eq!(normalize_path("/notes/rust/"), "/notes/rust");
		assert_eq!(normalize_path("/notes/rust"), "/notes/rust");
	}

	#[test]
	fn root_and_empty_survive() {
		assert_eq!(normalize_path("/"), "/");
		assert_eq!(normalize_path(""), "");
	}

	#[test]
	fn percent_escapes_are_decoded() {
		assert_eq!(normalize_path("/my%20notes/caf%C3%A9/"), "/my notes/café");
		assert_eq!(normalize_path("/my notes/café"), "/my notes/café");
	}

	#[test]
	fn invalid_escapes_fall_back_to_raw() {
		assert_eq!(normalize_path("/bad%FF/"), "/bad%FF");
	}
}
