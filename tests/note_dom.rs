#![cfg(target_arch = "wasm32")]

use site_canvas::components::canvas_board::note::extract_content;
use site_canvas::error::LoadError;
use wasm_bindgen_test::*;
use web_sys::{Document, DomParser, SupportedType};

wasm_bindgen_test_configure!(run_in_browser);

fn parse(html: &str) -> Document {
	DomParser::new()
		.unwrap()
		.parse_from_string(html, SupportedType::TextHtml)
		.unwrap()
}

#[wasm_bindgen_test]
fn content_is_wrapped_without_toc() {
	let page = parse(
		r##"<html><body>
			<nav>site chrome</nav>
			<main id="content"><div class="toc"><a href="#a">A</a></div><h1 id="a">Title</h1><p>Body</p></main>
		</body></html>"##,
	);
	let html = extract_content(&page, "/notes/a/index.html").unwrap();

	assert!(html.starts_with(r#"<div class="content">"#));
	assert!(html.ends_with("</div>"));
	assert!(html.contains("<p>Body</p>"));
	assert!(!html.contains("toc"));
	assert!(!html.contains("site chrome"));
}

#[wasm_bindgen_test]
fn page_without_content_region_fails() {
	let page = parse("<html><body><p>404</p></body></html>");
	let err = extract_content(&page, "/missing").unwrap_err();
	assert!(matches!(err, LoadError::MissingContent(ref url) if url == "/missing"));
}
