//! # inkwell-render
//!
//! Template rendering library for inkwell.
//!
//! Every page is an inner fragment template. Full page loads wrap the
//! fragment in [`LayoutTemplate`]; htmx navigations get the fragment alone.

pub mod templates;

use askama::Template;
use chrono::Datelike;
use inkwell_core::AssetManifest;

pub use templates::{
    ContentTemplate, HomeTemplate, LayoutTemplate, ListTemplate, NotFoundTemplate,
};

/// Whether to wrap a fragment in the page layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Full,
    Fragment,
}

/// Page-level data the layout needs around a fragment
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub site_title: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub assets: &'a AssetManifest,
}

/// Render `fragment`, wrapped in the layout when `frame` is [`Frame::Full`]
pub fn render_page<T: Template>(
    fragment: &T,
    frame: Frame,
    chrome: &Chrome<'_>,
) -> askama::Result<String> {
    let body = fragment.render()?;
    match frame {
        Frame::Fragment => Ok(body),
        Frame::Full => LayoutTemplate {
            title: chrome.title,
            description: chrome.description,
            site_title: chrome.site_title,
            year: chrono::Utc::now().year(),
            assets: chrome.assets,
            body: &body,
        }
        .render(),
    }
}
