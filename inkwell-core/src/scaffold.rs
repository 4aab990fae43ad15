//! Creation of new, front-matter-stubbed content files.

use crate::models::Collection;
use crate::slug::slugify;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Title {0:?} does not produce a usable file name")]
    EmptySlug(String),

    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Create `<root>/<collection dir>/<slug>.md` with a front matter stub
///
/// Returns the path of the new file. Never overwrites an existing file.
pub fn create_entry(
    root: &Path,
    collection: Collection,
    title: &str,
    now: DateTime<Utc>,
) -> Result<PathBuf, ScaffoldError> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(ScaffoldError::EmptySlug(title.to_string()));
    }

    let dir = root.join(collection.dir_name());
    fs::create_dir_all(&dir).map_err(|source| ScaffoldError::Io {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(format!("{slug}.md"));
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(ScaffoldError::AlreadyExists(path));
        }
        Err(source) => return Err(ScaffoldError::Io { path, source }),
    };

    file.write_all(stub(title, now).as_bytes())
        .map_err(|source| ScaffoldError::Io {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

/// Front matter stub for a new file
pub fn stub(title: &str, now: DateTime<Utc>) -> String {
    format!(
        "---\ntitle: \"{}\"\ndesc: \"\"\ncreatedAt: \"{}\"\n---\n",
        quote_escape(title),
        now.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

fn quote_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
