//! Runtime loading of markdown notes the generator did not embed.

use log::warn;
use web_sys::{Document, DomParser, SupportedType};

use crate::dom;
use crate::error::LoadError;
use crate::slug::{slug_path, strip_md_extension};

/// Selector of the rendered note body inside a page.
pub const CONTENT_SELECTOR: &str = "#content";
/// Table of contents removed from embedded notes.
pub const TOC_SELECTOR: &str = ".toc";

/// Site path of a note, from its file name without extension.
pub fn note_href(clean_name: &str) -> String {
	format!("/{}", slug_path(clean_name))
}

/// URLs to try, in order, for a markdown file's rendered page.
pub fn note_candidates(file: &str) -> Vec<String> {
	let path = slug_path(strip_md_extension(file));
	vec![format!("/{path}/index.html"), format!("/{path}")]
}

/// Pull the note body out of a fetched page, dropping its table of contents.
pub fn extract_content(page: &Document, source: &str) -> Result<String, LoadError> {
	let content = page
		.query_selector(CONTENT_SELECTOR)?
		.ok_or_else(|| LoadError::MissingContent(source.to_owned()))?;
	if let Some(toc) = content.query_selector(TOC_SELECTOR)? {
		toc.remove();
	}
	Ok(format!(r#"<div class="content">{}</div>"#, content.inner_html()))
}

/// Fetch the first candidate that answers and return its content markup.
pub async fn fetch_note(candidates: &[String]) -> Result<String, LoadError> {
	let mut last_error = LoadError::MissingContent(String::from("<no candidates>"));
	for url in candidates {
		match dom::fetch_text(url).await {
			Ok(html) => {
				let page = DomParser::new()?.parse_from_string(&html, SupportedType::TextHtml)?;
				return extract_content(&page, url);
			}
			Err(err) => {
				warn!("canvas: {} failed: {}", url, err);
				last_error = err;
			}
		}
	}
	Err(last_error)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn candidates_use_slugged_segments() {
		assert_eq!(
			note_candidates("Projects/Big Plan.md"),
			["/projects/big-plan/index.html", "/projects/big-plan"]
		);
	}

	#[test]
	fn href_is_root_relative() {
		assert_eq!(note_href("Inbox/To Do"), "/inbox/to-do");
	}
}
