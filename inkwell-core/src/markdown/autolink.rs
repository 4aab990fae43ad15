//! Turns bare URLs and e-mail addresses in running text into links.

use linkify::{LinkFinder, LinkKind};
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};

/// Transformer wrapping `https://...`, `www....` and e-mail text in links
pub struct Linkifier {
    finder: LinkFinder,
}

impl Linkifier {
    pub fn new() -> Self {
        let mut finder = LinkFinder::new();
        // `www.` links carry no scheme; other scheme-less hits are dropped below
        finder.url_must_have_scheme(false);
        Self { finder }
    }

    /// Split text events around the links they contain
    ///
    /// Text inside links, images and code blocks is passed through as-is.
    pub fn transform<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut result = Vec::with_capacity(events.len());
        let mut opaque = 0usize;

        for event in events {
            match &event {
                Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                    opaque += 1;
                }
                Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                    opaque = opaque.saturating_sub(1);
                }
                Event::Text(text) if opaque == 0 => {
                    if self.push_linked(text, &mut result) {
                        continue;
                    }
                }
                _ => {}
            }
            result.push(event);
        }

        result
    }

    /// Push `text` with its links expanded; false if it has none
    fn push_linked<'a>(&self, text: &str, out: &mut Vec<Event<'a>>) -> bool {
        let links: Vec<_> = self
            .finder
            .links(text)
            .filter_map(|link| {
                let (dest, link_type) = destination(link.as_str(), link.kind())?;
                Some((link.start(), link.end(), dest, link_type))
            })
            .collect();
        if links.is_empty() {
            return false;
        }

        let mut last = 0;
        for (start, end, dest, link_type) in links {
            if start > last {
                out.push(Event::Text(CowStr::from(text[last..start].to_string())));
            }
            out.push(Event::Start(Tag::Link {
                link_type,
                dest_url: CowStr::from(dest),
                title: CowStr::Borrowed(""),
                id: CowStr::Borrowed(""),
            }));
            out.push(Event::Text(CowStr::from(text[start..end].to_string())));
            out.push(Event::End(TagEnd::Link));
            last = end;
        }
        if last < text.len() {
            out.push(Event::Text(CowStr::from(text[last..].to_string())));
        }
        true
    }
}

impl Default for Linkifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Link target for a match, or `None` for bare domains like `node.js`
fn destination(link: &str, kind: &LinkKind) -> Option<(String, LinkType)> {
    match kind {
        LinkKind::Email => Some((format!("mailto:{link}"), LinkType::Email)),
        LinkKind::Url if link.contains("://") => Some((link.to_string(), LinkType::Autolink)),
        LinkKind::Url if link.starts_with("www.") => {
            Some((format!("http://{link}"), LinkType::Autolink))
        }
        _ => None,
    }
}
