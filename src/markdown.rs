//! Markdown to HTML for text cards.

use pulldown_cmark::{Options, Parser, html};

/// Render a markdown string to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
	let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
	let mut out = String::with_capacity(markdown.len() * 3 / 2);
	html::push_html(&mut out, Parser::new_ext(markdown, options));
	out
}
