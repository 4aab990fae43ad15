//! Directories compiled into the binary.

use include_dir::{include_dir, Dir};

/// Markdown collections served when no content root is configured
pub static CONTENT_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/../content");

/// Stylesheets and scripts, served under content-hashed URLs
pub static STATIC_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/../static");

/// Images and other files served as-is under `/assets`
pub static ASSETS_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/../assets");
