//! Read-only content repositories.
//!
//! Content is either bundled into the binary at build time
//! ([`EmbeddedStore`]) or read from a directory on disk ([`FsStore`]).
//! Both expose the same flat view: a collection is a directory of entries.

use crate::models::Collection;
use include_dir::Dir;
use std::borrow::Cow;
use std::path::PathBuf;
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Collection directory missing: {0}")]
    MissingCollection(&'static str),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A single directory entry within a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
    pub modified: Option<SystemTime>,
}

/// Immutable repository of collection files
pub trait ContentStore: Send + Sync {
    /// List the entries of a collection, sorted by name
    fn list(&self, collection: Collection) -> Result<Vec<EntryInfo>, StoreError>;

    /// Read a file from a collection
    fn read(&self, collection: Collection, name: &str) -> Result<Cow<'_, [u8]>, StoreError>;

    /// Last modification time of a file, if the store tracks it
    fn modified(&self, collection: Collection, name: &str)
        -> Result<Option<SystemTime>, StoreError>;
}

/// Reject names that would escape the collection directory
fn check_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(StoreError::NotFound(name.to_string()));
    }
    Ok(())
}

/// Content bundled into the binary with `include_dir!`
pub struct EmbeddedStore {
    root: &'static Dir<'static>,
}

impl EmbeddedStore {
    pub fn new(root: &'static Dir<'static>) -> Self {
        Self { root }
    }

    fn collection_dir(&self, collection: Collection) -> Result<&'static Dir<'static>, StoreError> {
        self.root
            .get_dir(collection.dir_name())
            .ok_or(StoreError::MissingCollection(collection.dir_name()))
    }

    fn file(
        &self,
        collection: Collection,
        name: &str,
    ) -> Result<&'static include_dir::File<'static>, StoreError> {
        check_name(name)?;
        let path = format!("{}/{}", collection.dir_name(), name);
        self.root
            .get_file(&path)
            .ok_or(StoreError::NotFound(path))
    }
}

impl ContentStore for EmbeddedStore {
    fn list(&self, collection: Collection) -> Result<Vec<EntryInfo>, StoreError> {
        let dir = self.collection_dir(collection)?;
        let mut entries: Vec<EntryInfo> = dir
            .entries()
            .iter()
            .filter_map(|entry| {
                let name = entry.path().file_name()?.to_string_lossy().to_string();
                Some(match entry {
                    include_dir::DirEntry::Dir(_) => EntryInfo {
                        name,
                        is_dir: true,
                        modified: None,
                    },
                    include_dir::DirEntry::File(file) => EntryInfo {
                        name,
                        is_dir: false,
                        modified: file.metadata().map(|m| m.modified()),
                    },
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, collection: Collection, name: &str) -> Result<Cow<'_, [u8]>, StoreError> {
        Ok(Cow::Borrowed(self.file(collection, name)?.contents()))
    }

    fn modified(
        &self,
        collection: Collection,
        name: &str,
    ) -> Result<Option<SystemTime>, StoreError> {
        Ok(self.file(collection, name)?.metadata().map(|m| m.modified()))
    }
}

/// Content read from a directory on disk
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, collection: Collection, name: &str) -> Result<PathBuf, StoreError> {
        check_name(name)?;
        Ok(self.root.join(collection.dir_name()).join(name))
    }
}

impl ContentStore for FsStore {
    fn list(&self, collection: Collection) -> Result<Vec<EntryInfo>, StoreError> {
        let dir = self.root.join(collection.dir_name());
        if !dir.is_dir() {
            return Err(StoreError::MissingCollection(collection.dir_name()));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| StoreError::Walk {
                path: dir.clone(),
                source,
            })?;
            let modified = match entry.metadata() {
                Ok(meta) => meta.modified().ok(),
                Err(e) => {
                    tracing::warn!("Error getting file info for {:?}: {}", entry.path(), e);
                    None
                }
            };
            entries.push(EntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: entry.file_type().is_dir(),
                modified,
            });
        }
        Ok(entries)
    }

    fn read(&self, collection: Collection, name: &str) -> Result<Cow<'_, [u8]>, StoreError> {
        let path = self.file_path(collection, name)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(path.display().to_string()))
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn modified(
        &self,
        collection: Collection,
        name: &str,
    ) -> Result<Option<SystemTime>, StoreError> {
        let path = self.file_path(collection, name)?;
        match std::fs::metadata(&path) {
            Ok(meta) => Ok(meta.modified().ok()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(path.display().to_string()))
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}
