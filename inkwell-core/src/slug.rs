//! Slug generation for file names and heading ids.

use regex::Regex;
use std::sync::OnceLock;

static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn separator_regex() -> &'static Regex {
    SEPARATOR_REGEX.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap())
}

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Every run of non-alphanumeric characters becomes a single hyphen
/// - Leading/trailing hyphens are trimmed
///
/// # Examples
///
/// ```
/// use inkwell_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Notes: Vol. 2"), "notes-vol-2");
/// assert_eq!(slugify("Wait... what?"), "wait-what");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();
    separator_regex()
        .replace_all(&lowercased, "-")
        .trim_matches('-')
        .to_string()
}

/// Turn a slug back into something readable ("my-first-post" -> "my first post")
pub fn unslugify(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_become_file_names() {
        assert_eq!(slugify("My First Post"), "my-first-post");
        assert_eq!(slugify("Getting Started"), "getting-started");
    }

    #[test]
    fn test_punctuation_becomes_hyphens() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Node.js Tips"), "node-js-tips");
        assert_eq!(slugify("What's new?"), "what-s-new");
    }

    #[test]
    fn test_letters_outside_ascii_survive() {
        assert_eq!(slugify("Crème Brûlée"), "crème-brûlée");
        assert_eq!(slugify("日本語 メモ"), "日本語-メモ");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(slugify("tabs\tand   spaces"), "tabs-and-spaces");
        assert_eq!(slugify("a -- b __ c"), "a-b-c");
    }

    #[test]
    fn test_edges_trimmed() {
        assert_eq!(slugify("  padded  "), "padded");
        assert_eq!(slugify("--draft--"), "draft");
        assert_eq!(slugify("(v2)"), "v2");
    }

    #[test]
    fn test_nothing_left() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("?!"), "");
        assert_eq!(slugify(" \t "), "");
    }

    #[test]
    fn test_unslugify() {
        assert_eq!(unslugify("my-first-post"), "my first post");
        assert_eq!(unslugify("rust_notes"), "rust notes");
    }
}
