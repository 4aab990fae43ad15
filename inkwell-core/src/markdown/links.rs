//! Rewrites relative content links and image paths to site routes.

use crate::models::Collection;
use pulldown_cmark::{CowStr, Event, Tag};

const CONTENT_EXTENSION: &str = ".md";

/// Transformer mapping `.md` links onto `/wiki/..` and `/blog/..` routes
pub struct LinkRewriter;

impl LinkRewriter {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite link and image destinations in place
    pub fn transform(&self, events: &mut [Event<'_>]) {
        for event in events.iter_mut() {
            match event {
                Event::Start(Tag::Link { dest_url, .. }) => {
                    if let Some(rewritten) = rewrite_link(&**dest_url) {
                        *dest_url = CowStr::from(rewritten);
                    }
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    if let Some(rewritten) = rewrite_image(&**dest_url) {
                        *dest_url = CowStr::from(rewritten);
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for LinkRewriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Route for a link to another content file, if it points into a collection
pub fn rewrite_link(dest: &str) -> Option<String> {
    if !dest.ends_with(CONTENT_EXTENSION) || is_external(dest) {
        return None;
    }

    let collection = Collection::from_marker(dest)?;
    let base = dest.rsplit('/').next().unwrap_or(dest);
    let slug = base.strip_suffix(CONTENT_EXTENSION).unwrap_or(base);
    Some(format!("{}/{}", collection.route(), slug))
}

/// Absolute path for a relative image source
pub fn rewrite_image(dest: &str) -> Option<String> {
    if is_external(dest) || dest.starts_with('/') {
        return None;
    }
    Some(clean_absolute(dest))
}

fn is_external(dest: &str) -> bool {
    dest.starts_with("http")
}

/// Join `path` onto `/` and resolve `.` and `..` segments
fn clean_absolute(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}
