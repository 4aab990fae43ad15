//! Heading id generation and table-of-contents collection.

use crate::models::Heading;
use crate::slug::slugify;
use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use std::collections::HashSet;

/// Hands out unique heading ids within one document
#[derive(Debug, Default)]
pub struct HeadingIds {
    used: HashSet<String>,
}

impl HeadingIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text`, appending `-1`, `-2`, ... until the id is unused
    pub fn generate(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = String::from("heading");
        }

        if self.used.insert(base.clone()) {
            return base;
        }

        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Give every heading an id derived from its text, unique within the document
pub fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut ids = HeadingIds::new();
    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { .. })) {
            continue;
        }
        let generated = ids.generate(&heading_text(&events[i + 1..]));
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(generated));
        }
    }
}

/// Collect headings in document order
///
/// Read-only; expects ids to have been assigned already.
pub fn collect_headings(events: &[Event<'_>]) -> Vec<Heading> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match event {
            Event::Start(Tag::Heading { level, id, .. }) => Some(Heading {
                level: *level as u8,
                text: heading_text(&events[i + 1..]),
                id: id.as_deref().unwrap_or_default().to_string(),
            }),
            _ => None,
        })
        .collect()
}

/// Plain text of a heading, given the events following its start tag
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::{Options, Parser};

    fn parse(md: &str) -> Vec<Event<'_>> {
        Parser::new_ext(md, Options::empty()).collect()
    }

    #[test]
    fn test_generate_unique_ids() {
        let mut ids = HeadingIds::new();
        assert_eq!(ids.generate("Intro"), "intro");
        assert_eq!(ids.generate("Intro"), "intro-1");
        assert_eq!(ids.generate("Intro"), "intro-2");
        assert_eq!(ids.generate("!!!"), "heading");
        assert_eq!(ids.generate("???"), "heading-1");
    }

    #[test]
    fn test_generated_suffix_skips_taken_ids() {
        let mut ids = HeadingIds::new();
        assert_eq!(ids.generate("Setup 1"), "setup-1");
        assert_eq!(ids.generate("Setup"), "setup");
        assert_eq!(ids.generate("Setup"), "setup-2");
    }

    #[test]
    fn test_collect_headings_in_order() {
        let mut events = parse("# Title\n\n## First `code`\n\ntext\n\n### Deep *em*\n\n## Title\n");
        assign_heading_ids(&mut events);
        let headings = collect_headings(&events);

        assert_eq!(
            headings,
            vec![
                Heading { level: 1, text: "Title".into(), id: "title".into() },
                Heading { level: 2, text: "First code".into(), id: "first-code".into() },
                Heading { level: 3, text: "Deep em".into(), id: "deep-em".into() },
                Heading { level: 2, text: "Title".into(), id: "title-1".into() },
            ]
        );
    }

    #[test]
    fn test_braces_stay_in_heading_text() {
        let mut events = parse("# Config {json}\n\n# Use {#x}\n\n# Dup {#x}\n");
        assign_heading_ids(&mut events);
        let headings = collect_headings(&events);

        assert_eq!(headings[0].text, "Config {json}");
        assert_eq!(headings[0].id, "config-json");
        assert_eq!(headings[1].text, "Use {#x}");
        assert_eq!(headings[1].id, "use-x");
        assert_eq!(headings[2].text, "Dup {#x}");
        assert_eq!(headings[2].id, "dup-x");
    }

    #[test]
    fn test_same_text_gets_distinct_ids() {
        let mut events = parse("# {#x}\n\n# {#x}\n");
        assign_heading_ids(&mut events);
        let ids: Vec<String> = collect_headings(&events).into_iter().map(|h| h.id).collect();

        assert_eq!(ids, vec!["x", "x-1"]);
    }
}
