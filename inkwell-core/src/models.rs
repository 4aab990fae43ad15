//! Content model: collections, metadata, headings and listing entries.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// One of the two content groupings served by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Blog,
    Wiki,
}

impl Collection {
    /// Directory holding the collection's files
    pub fn dir_name(&self) -> &'static str {
        match self {
            Collection::Blog => "blogs",
            Collection::Wiki => "wikis",
        }
    }

    /// Route prefix the collection is served under
    pub fn route(&self) -> &'static str {
        match self {
            Collection::Blog => "/blog",
            Collection::Wiki => "/wiki",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::Blog => "Blogs",
            Collection::Wiki => "Wikis",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Blog => "blog",
            Collection::Wiki => "wiki",
        }
    }

    /// Find the collection a path segment marker points at (`wikis/`, `blogs/`)
    pub fn from_marker(path: &str) -> Option<Self> {
        // wiki wins when both markers appear
        if path.contains("wikis/") {
            Some(Collection::Wiki)
        } else if path.contains("blogs/") {
            Some(Collection::Blog)
        } else {
            None
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Front matter metadata from markdown files
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub title: Option<String>,

    #[serde(alias = "desc")]
    pub description: Option<String>,

    #[serde(rename = "createdAt", alias = "created_time")]
    pub created_at: Option<String>,
}

impl Metadata {
    /// Title if present and not blank
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self == &Metadata::default()
    }
}

/// A heading collected for the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

/// A single item in a collection listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    /// File name without the `.md` extension
    pub slug: String,

    /// Display title
    pub title: String,

    /// Creation time from front matter, else file modification time
    pub timestamp: DateTime<Utc>,
}

impl ContentEntry {
    pub fn display_date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    /// URL path for this entry within its collection
    pub fn url(&self, collection: Collection) -> String {
        format!("{}/{}", collection.route(), self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_collection_markers() {
        assert_eq!(Collection::from_marker("../wikis/foo.md"), Some(Collection::Wiki));
        assert_eq!(Collection::from_marker("blogs/bar.md"), Some(Collection::Blog));
        assert_eq!(Collection::from_marker("notes/baz.md"), None);
    }

    #[test]
    fn test_metadata_title_ignores_blank() {
        let meta = Metadata {
            title: Some("   ".into()),
            ..Metadata::default()
        };
        assert_eq!(meta.title(), None);
        assert!(Metadata::default().is_empty());
    }

    #[test]
    fn test_entry_url_and_date() {
        let entry = ContentEntry {
            slug: "hello".into(),
            title: "Hello".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };
        assert_eq!(entry.url(Collection::Wiki), "/wiki/hello");
        assert_eq!(entry.display_date(), "2024-03-01");
    }
}
