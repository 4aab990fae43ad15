//! Collection listings: one entry per markdown file, newest first.

use crate::frontmatter::parse_frontmatter;
use crate::models::{Collection, ContentEntry, Metadata};
use crate::slug::unslugify;
use crate::store::{ContentStore, StoreError};
use chrono::{DateTime, Utc};
use std::time::SystemTime;

pub const CONTENT_EXTENSION: &str = "md";

/// List the entries of a collection, most recent first
///
/// Files that cannot be read are skipped; broken front matter falls back to
/// defaults. Entries with equal timestamps keep the store's name order.
pub fn list_entries(
    store: &dyn ContentStore,
    collection: Collection,
) -> Result<Vec<ContentEntry>, StoreError> {
    let suffix = format!(".{CONTENT_EXTENSION}");
    let mut items = Vec::new();

    for info in store.list(collection)? {
        if info.is_dir {
            continue;
        }
        let Some(slug) = info.name.strip_suffix(&suffix) else {
            continue;
        };

        let raw = match store.read(collection, &info.name) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Error reading file {}/{}: {}", collection.dir_name(), info.name, e);
                continue;
            }
        };

        let origin = format!("{}/{}", collection.dir_name(), info.name);
        let (metadata, _) = parse_frontmatter(&raw, &origin);

        items.push(ContentEntry {
            slug: slug.to_string(),
            title: display_title(&metadata, slug),
            timestamp: entry_timestamp(&metadata, info.modified, &origin),
        });
    }

    sort_newest_first(&mut items);
    Ok(items)
}

/// Metadata title, else the slug with separators turned into spaces
pub fn display_title(metadata: &Metadata, slug: &str) -> String {
    metadata
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| unslugify(slug))
}

fn entry_timestamp(metadata: &Metadata, modified: Option<SystemTime>, origin: &str) -> DateTime<Utc> {
    let fallback = DateTime::<Utc>::from(modified.unwrap_or(SystemTime::UNIX_EPOCH));

    let Some(created) = metadata.created_at.as_deref() else {
        return fallback;
    };
    match DateTime::parse_from_rfc3339(created.trim()) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!("Error parsing createdAt for {}: {}", origin, e);
            fallback
        }
    }
}

/// Stable sort by timestamp, newest first
pub fn sort_newest_first(items: &mut [ContentEntry]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsStore;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &std::path::Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_sort_by_created_at_descending() {
        let tmp = tempdir().unwrap();
        let blogs = tmp.path().join("blogs");
        fs::create_dir_all(&blogs).unwrap();
        write(&blogs, "jan.md", "---\ntitle: January\ncreatedAt: 2024-01-01T00:00:00Z\n---\nx");
        write(&blogs, "mar.md", "---\ntitle: March\ncreatedAt: 2024-03-01T00:00:00Z\n---\nx");
        write(&blogs, "feb.md", "---\ntitle: February\ncreated_time: 2024-02-01T00:00:00Z\n---\nx");

        let entries = list_entries(&FsStore::new(tmp.path()), Collection::Blog).unwrap();
        let slugs: Vec<_> = entries.iter().map(|e| e.slug.as_str()).collect();

        assert_eq!(slugs, vec!["mar", "feb", "jan"]);
        assert_eq!(entries[0].title, "March");
        assert_eq!(
            entries[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_skips_directories_and_other_files() {
        let tmp = tempdir().unwrap();
        let wikis = tmp.path().join("wikis");
        fs::create_dir_all(wikis.join("nested.md")).unwrap();
        write(&wikis, "notes.txt", "ignored");
        write(&wikis, "rust-tips.md", "# Rust tips");

        let entries = list_entries(&FsStore::new(tmp.path()), Collection::Wiki).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug, "rust-tips");
        assert_eq!(entries[0].title, "rust tips");
    }

    #[test]
    fn test_broken_metadata_uses_defaults() {
        let tmp = tempdir().unwrap();
        let wikis = tmp.path().join("wikis");
        fs::create_dir_all(&wikis).unwrap();
        write(&wikis, "broken.md", "---\ntitle: [oops\n---\nbody");
        write(&wikis, "bad-date.md", "---\ntitle: Bad date\ncreatedAt: yesterday\n---\nbody");

        let entries = list_entries(&FsStore::new(tmp.path()), Collection::Wiki).unwrap();
        let broken = entries.iter().find(|e| e.slug == "broken").unwrap();
        let bad_date = entries.iter().find(|e| e.slug == "bad-date").unwrap();

        assert_eq!(broken.title, "broken");
        assert_eq!(bad_date.title, "Bad date");
        assert!(bad_date.timestamp > Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_collection_is_error() {
        let tmp = tempdir().unwrap();
        assert!(list_entries(&FsStore::new(tmp.path()), Collection::Blog).is_err());
    }

    #[test]
    fn test_equal_timestamps_keep_order() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entry = |slug: &str, ts| ContentEntry {
            slug: slug.into(),
            title: slug.into(),
            timestamp: ts,
        };
        let mut items = vec![
            entry("a", ts),
            entry("b", ts),
            entry("newest", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            entry("c", ts),
        ];

        sort_newest_first(&mut items);
        let slugs: Vec<_> = items.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newest", "a", "b", "c"]);
    }
}
