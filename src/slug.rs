//! URL slugs matching the ones the page generator writes to disk.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"--+").unwrap());

/// Lowercase, trim, hyphenate whitespace, drop non-word characters and
/// collapse hyphen runs.
pub fn slugify(text: &str) -> String {
	let lowered = text.to_lowercase();
	let hyphenated = WHITESPACE.replace_all(lowered.trim(), "-");
	let stripped = NON_WORD.replace_all(&hyphenated, "");
	HYPHENS.replace_all(&stripped, "-").into_owned()
}

/// Strip a case-insensitive `.md` suffix.
pub fn strip_md_extension(file: &str) -> &str {
	match file.len().checked_sub(3) {
		Some(cut) if file.is_char_boundary(cut) && file[cut..].eq_ignore_ascii_case(".md") => {
			&file[..cut]
		}
		_ => file,
	}
}

/// Slug each `/`-separated segment of `path` (extension already stripped).
pub fn slug_path(path: &str) -> String {
	path.split('/').map(slugify).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slugifies_note_names() {
		assert_eq!(slugify(strip_md_extension("My Note.md")), "my-note");
		assert_eq!(slugify("A--B"), "a-b");
		assert_eq!(slugify("  Hello,   World!  "), "hello-world");
		assert_eq!(slugify("C++ & Rust"), "c-rust");
		assert_eq!(slugify("snake_case"), "snake_case");
	}

	#[test]
	fn strips_extension_case_insensitively() {
		assert_eq!(strip_md_extension("Notes/Intro.MD"), "Notes/Intro");
		assert_eq!(strip_md_extension("diagram.png"), "diagram.png");
		assert_eq!(strip_md_extension("md"), "md");
	}

	#[test]
	fn slugs_every_segment() {
		assert_eq!(slug_path("Daily Notes/2024 Plan"), "daily-notes/2024-plan");
	}
}
