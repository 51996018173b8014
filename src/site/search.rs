//! Sidebar filter driven by the navbar search box.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDetailsElement, HtmlElement};

pub const INPUT_ID: &str = "navbar-search";
const ITEM_SELECTOR: &str = "#left-sidebar li";
const SIDEBAR_SELECTOR: &str = ".sidebar";

/// Whether an item's text survives the filter `term`.
pub fn matches_filter(text: &str, term: &str) -> bool {
	text.to_lowercase().contains(&term.trim().to_lowercase())
}

fn open_details(el: &Element) {
	if let Some(details) = el.dyn_ref::<HtmlDetailsElement>() {
		details.set_open(true);
	}
}

/// Show the sidebar items matching `term`, hide the rest, and expand the
/// folders containing matches.
pub fn apply(document: &Document, term: &str) {
	let Ok(items) = document.query_selector_all(ITEM_SELECTOR) else {
		return;
	};
	let term = term.trim();
	for i in 0..items.length() {
		let Some(item) = items.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
			continue;
		};
		let text = item.text_content().unwrap_or_default();
		let matched = matches_filter(&text, term);
		let _ = item
			.style()
			.set_property("display", if matched { "" } else { "none" });
		if !matched || term.is_empty() {
			continue;
		}

		if let Ok(Some(details)) = item.query_selector("details") {
			open_details(&details);
		}
		let mut parent = item.parent_element();
		while let Some(el) = parent {
			if el.closest(SIDEBAR_SELECTOR).ok().flatten().is_none() {
				break;
			}
			open_details(&el);
			parent = el.parent_element();
		}
	}
}
