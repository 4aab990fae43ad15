//! Markdown processing pipeline.
//!
//! Body text is parsed into a pulldown-cmark event stream, passed through
//! the heading id, link rewrite, autolink and highlight transforms, and
//! serialized to HTML. Headings are collected for the table of contents along the way.

pub mod autolink;
pub mod highlight;
pub mod links;
pub mod toc;

use crate::models::Heading;
use pulldown_cmark::{html, Event, Options, Parser, TextMergeStream};
use thiserror::Error;

pub use autolink::Linkifier;
pub use highlight::HighlightTransformer;
pub use links::LinkRewriter;
pub use toc::{assign_heading_ids, collect_headings, HeadingIds};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// A rendered page body with its table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    pub headings: Vec<Heading>,
}

/// Markdown processor with the GitHub-flavored extensions enabled
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_GFM);

        Self { options }
    }

    /// Convert a markdown body to HTML and its heading list
    pub fn render(&self, body: &[u8]) -> Result<RenderedDocument, RenderError> {
        let markdown = std::str::from_utf8(body)?;
        Ok(self.render_str(markdown))
    }

    /// Convert markdown text to HTML and its heading list
    pub fn render_str(&self, markdown: &str) -> RenderedDocument {
        // Merged text keeps URLs split by escapes or entities in one piece
        let mut events: Vec<Event> =
            TextMergeStream::new(Parser::new_ext(markdown, self.options)).collect();

        assign_heading_ids(&mut events);
        LinkRewriter::new().transform(&mut events);
        let events = Linkifier::new().transform(events);
        let headings = collect_headings(&events);

        let events = HighlightTransformer::new().transform(events);

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());

        RenderedDocument {
            html: html_output,
            headings,
        }
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}
