//! Content-hashed static asset paths.
//!
//! Every embedded static file gets a served path with the first eight hex
//! characters of its SHA-256 digest spliced in before the extension, so the
//! URL changes whenever the file does.

use include_dir::{Dir, DirEntry};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::OnceLock;

const HASH_LEN: usize = 8;

static HASHED_PATH_REGEX: OnceLock<Regex> = OnceLock::new();

fn hashed_path_regex() -> &'static Regex {
    HASHED_PATH_REGEX.get_or_init(|| Regex::new(r"^(.*)\.[0-9a-f]{8}(\..*)$").unwrap())
}

/// Map of `/static/...` paths to their hashed form, built once at startup
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    hashed: HashMap<String, String>,
}

impl AssetManifest {
    /// Hash every file in `dir`, mounting paths under `mount` (e.g. `/static`)
    pub fn from_dir(dir: &Dir<'_>, mount: &str) -> Self {
        let mut manifest = Self::default();
        let mount = mount.trim_end_matches('/');
        manifest.add_entries(dir.entries(), mount);
        tracing::debug!("Hashed {} static assets", manifest.hashed.len());
        manifest
    }

    fn add_entries(&mut self, entries: &[DirEntry<'_>], mount: &str) {
        for entry in entries {
            match entry {
                DirEntry::Dir(dir) => self.add_entries(dir.entries(), mount),
                DirEntry::File(file) => {
                    let rel = file.path().to_string_lossy().replace('\\', "/");
                    self.insert(&format!("{mount}/{rel}"), file.contents());
                }
            }
        }
    }

    /// Register a file's contents under its unhashed path
    pub fn insert(&mut self, path: &str, contents: &[u8]) {
        let hashed = hashed_path(path, &content_hash(contents));
        self.hashed.insert(path.to_string(), hashed);
    }

    /// Hashed path for `path`, or `path` itself when it is not a known asset
    pub fn path<'a>(&'a self, path: &'a str) -> &'a str {
        self.hashed.get(path).map(String::as_str).unwrap_or(path)
    }
}

/// First eight hex characters of the SHA-256 digest
pub fn content_hash(contents: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(contents));
    digest[..HASH_LEN].to_string()
}

/// Splice `hash` in front of the final extension of `path`
pub fn hashed_path(path: &str, hash: &str) -> String {
    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[file_start..].rfind('.') {
        Some(dot) => {
            let (base, ext) = path.split_at(file_start + dot);
            format!("{base}.{hash}{ext}")
        }
        None => format!("{path}.{hash}"),
    }
}

/// Strip a hash segment from a request path, if it has one
pub fn unhash_path(path: &str) -> Option<String> {
    hashed_path_regex()
        .captures(path)
        .map(|caps| format!("{}{}", &caps[1], &caps[2]))
}
