//! Front matter extraction from raw markdown bytes.
//!
//! Parsing is forgiving: a document without a well-formed `---` block is
//! returned untouched, and a block that fails to parse as YAML is reported
//! alongside the result instead of failing the caller.

use crate::models::Metadata;
use thiserror::Error;

const DELIMITER: &[u8] = b"---";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result of splitting a document into metadata and body
#[derive(Debug)]
pub struct Extracted<'a> {
    pub metadata: Metadata,
    pub body: &'a [u8],
    /// Set when a metadata block was present but could not be parsed
    pub error: Option<FrontmatterError>,
}

/// Split a raw document into its metadata and body
///
/// Only the first two `---` delimiters matter. Anything before the first one
/// must be whitespace, otherwise the document is treated as having no front
/// matter at all.
///
/// # Example
///
/// ```
/// use inkwell_core::frontmatter::extract_frontmatter;
///
/// let raw = b"---\ntitle: My Post\ncreatedAt: 2024-01-01T00:00:00Z\n---\n# Hello\n";
/// let extracted = extract_frontmatter(raw);
/// assert_eq!(extracted.metadata.title.as_deref(), Some("My Post"));
/// assert_eq!(extracted.body, b"# Hello");
/// assert!(extracted.error.is_none());
/// ```
pub fn extract_frontmatter(raw: &[u8]) -> Extracted<'_> {
    let untouched = Extracted {
        metadata: Metadata::default(),
        body: raw,
        error: None,
    };

    let Some(first) = find(raw, DELIMITER) else {
        return untouched;
    };
    let block_start = first + DELIMITER.len();
    let Some(second) = find(&raw[block_start..], DELIMITER).map(|i| block_start + i) else {
        return untouched;
    };

    if !raw[..first].trim_ascii().is_empty() {
        return untouched;
    }

    let yaml = raw[block_start..second].trim_ascii();
    if yaml.is_empty() {
        return untouched;
    }

    let body = raw[second + DELIMITER.len()..].trim_ascii();
    match serde_yaml::from_slice::<Metadata>(yaml) {
        Ok(metadata) => Extracted {
            metadata,
            body,
            error: None,
        },
        Err(e) => Extracted {
            metadata: Metadata::default(),
            body,
            error: Some(FrontmatterError::YamlError(e)),
        },
    }
}

/// Extract front matter, logging (not returning) any parse failure
pub fn parse_frontmatter<'a>(raw: &'a [u8], origin: &str) -> (Metadata, &'a [u8]) {
    let extracted = extract_frontmatter(raw);
    if let Some(err) = &extracted.error {
        tracing::warn!("Error parsing front matter for {}: {}", origin, err);
    }
    (extracted.metadata, extracted.body)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_frontmatter() {
        let content = br#"---
title: Test Post
desc: A test post
createdAt: "2024-01-01T00:00:00Z"
---

# Hello World

This is the content."#;

        let extracted = extract_frontmatter(content);
        assert!(extracted.error.is_none());
        assert_eq!(extracted.metadata.title.as_deref(), Some("Test Post"));
        assert_eq!(extracted.metadata.description(), "A test post");
        assert_eq!(
            extracted.metadata.created_at.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
        assert!(extracted.body.starts_with(b"# Hello World"));
        assert!(extracted.body.ends_with(b"This is the content."));
    }

    #[test]
    fn test_alternate_key_names() {
        let content = b"---\ntitle: Alt\ndescription: Long form\ncreated_time: 2023-05-06T07:08:09+02:00\n---\nBody";
        let extracted = extract_frontmatter(content);
        assert_eq!(extracted.metadata.description(), "Long form");
        assert_eq!(
            extracted.metadata.created_at.as_deref(),
            Some("2023-05-06T07:08:09+02:00")
        );
        assert_eq!(extracted.body, b"Body");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let content = b"---\ntitle: Tagged\ntags: [a, b]\n---\nBody";
        let extracted = extract_frontmatter(content);
        assert!(extracted.error.is_none());
        assert_eq!(extracted.metadata.title(), Some("Tagged"));
    }

    #[test]
    fn test_no_frontmatter_returns_original() {
        let content = b"# Just Content\n\nNo frontmatter here.";
        let extracted = extract_frontmatter(content);
        assert!(extracted.metadata.is_empty());
        assert_eq!(extracted.body, content);
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let content = b"---\ntitle: Never closed\n\n# Body";
        let extracted = extract_frontmatter(content);
        assert!(extracted.metadata.is_empty());
        assert!(extracted.error.is_none());
        assert_eq!(extracted.body, content);
    }

    #[test]
    fn test_text_before_first_delimiter() {
        let content = b"Intro\n---\ntitle: Nope\n---\nBody";
        let extracted = extract_frontmatter(content);
        assert!(extracted.metadata.is_empty());
        assert_eq!(extracted.body, content);
    }

    #[test]
    fn test_empty_block_returns_original() {
        let content = b"---\n   \n---\nBody";
        let extracted = extract_frontmatter(content);
        assert!(extracted.metadata.is_empty());
        assert_eq!(extracted.body, content);
    }

    #[test]
    fn test_later_delimiters_stay_in_body() {
        let content = b"---\ntitle: Rules\n---\nabove\n\n---\n\nbelow";
        let extracted = extract_frontmatter(content);
        assert_eq!(extracted.metadata.title(), Some("Rules"));
        assert_eq!(extracted.body, b"above\n\n---\n\nbelow");
    }

    #[test]
    fn test_invalid_yaml_reports_error_and_keeps_body() {
        let content = b"---\ntitle: Test\ninvalid yaml: [unclosed\n---\n\nContent.";
        let extracted = extract_frontmatter(content);
        assert!(matches!(
            extracted.error,
            Some(FrontmatterError::YamlError(_))
        ));
        assert!(extracted.metadata.is_empty());
        assert_eq!(extracted.body, b"Content.");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let content = b"---\ntitle: Once\n---\n\n# Heading\n\nText\n";
        let first = extract_frontmatter(content);
        let second = extract_frontmatter(first.body);
        assert!(second.metadata.is_empty());
        assert!(second.error.is_none());
        assert_eq!(second.body, first.body);
    }

    #[test]
    fn test_parse_frontmatter_swallows_errors() {
        let content = b"---\n[broken\n---\nStill here";
        let (metadata, body) = parse_frontmatter(content, "broken.md");
        assert!(metadata.is_empty());
        assert_eq!(body, b"Still here");
    }
}
