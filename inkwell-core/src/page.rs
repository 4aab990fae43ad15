//! Loading a single content page: front matter, markdown body, TOC.

use crate::frontmatter::parse_frontmatter;
use crate::index::{display_title, CONTENT_EXTENSION};
use crate::markdown::{MarkdownProcessor, RenderError};
use crate::models::{Collection, Heading};
use crate::store::{ContentStore, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to render markdown: {0}")]
    Render(#[from] RenderError),
}

impl PageError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PageError::Store(StoreError::NotFound(_) | StoreError::MissingCollection(_))
        )
    }
}

/// A rendered content page ready for templating
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub html: String,
    pub toc: Vec<Heading>,
}

/// Load and render `<slug>.md` from a collection
pub fn load_page(
    store: &dyn ContentStore,
    processor: &MarkdownProcessor,
    collection: Collection,
    slug: &str,
) -> Result<Page, PageError> {
    let file_name = format!("{slug}.{CONTENT_EXTENSION}");
    let raw = store.read(collection, &file_name)?;

    let origin = format!("{}/{}", collection.dir_name(), file_name);
    let (metadata, body) = parse_frontmatter(&raw, &origin);
    let rendered = processor.render(body)?;

    Ok(Page {
        slug: slug.to_string(),
        title: display_title(&metadata, slug),
        description: metadata.description().to_string(),
        html: rendered.html,
        toc: rendered.headings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsStore;
    use std::fs;
    use tempfile::tempdir;

    fn store_with(name: &str, content: &[u8]) -> (tempfile::TempDir, FsStore) {
        let tmp = tempdir().unwrap();
        let wikis = tmp.path().join("wikis");
        fs::create_dir_all(&wikis).unwrap();
        fs::write(wikis.join(name), content).unwrap();
        let store = FsStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn test_load_page_with_metadata() {
        let (_tmp, store) = store_with(
            "intro.md",
            b"---\ntitle: Introduction\ndesc: Start here\n---\n# Welcome\n\n## Setup\n",
        );
        let page = load_page(&store, &MarkdownProcessor::new(), Collection::Wiki, "intro").unwrap();

        assert_eq!(page.title, "Introduction");
        assert_eq!(page.description, "Start here");
        assert_eq!(page.toc.len(), 2);
        assert_eq!(page.toc[1].id, "setup");
        assert!(page.html.contains(r#"<h1 id="welcome">Welcome</h1>"#));
    }

    #[test]
    fn test_title_falls_back_to_slug() {
        let (_tmp, store) = store_with("getting-started.md", b"Plain body");
        let page = load_page(
            &store,
            &MarkdownProcessor::new(),
            Collection::Wiki,
            "getting-started",
        )
        .unwrap();

        assert_eq!(page.title, "getting started");
        assert_eq!(page.description, "");
    }

    #[test]
    fn test_missing_page_is_not_found() {
        let (_tmp, store) = store_with("a.md", b"a");
        let err = load_page(&store, &MarkdownProcessor::new(), Collection::Wiki, "b").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_utf8_is_render_error() {
        let (_tmp, store) = store_with("bad.md", &[0xff, 0xfe, 0x00]);
        let err = load_page(&store, &MarkdownProcessor::new(), Collection::Wiki, "bad").unwrap_err();
        assert!(matches!(err, PageError::Render(_)));
        assert!(!err.is_not_found());
    }
}
