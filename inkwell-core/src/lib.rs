//! # inkwell-core
//!
//! Core library for the inkwell blog and wiki server.
//!
//! This crate turns markdown files into HTML: front matter extraction, the
//! markdown transform pipeline (heading ids, link rewriting, table of
//! contents, highlighting), collection listings, and the stores content is
//! read from.

pub mod assets;
pub mod config;
pub mod frontmatter;
pub mod index;
pub mod markdown;
pub mod models;
pub mod page;
pub mod scaffold;
pub mod slug;
pub mod store;

pub use assets::AssetManifest;
pub use config::Config;
pub use index::list_entries;
pub use markdown::{MarkdownProcessor, RenderError, RenderedDocument};
pub use models::{Collection, ContentEntry, Heading, Metadata};
pub use page::{load_page, Page, PageError};
pub use slug::slugify;
pub use store::{ContentStore, EmbeddedStore, FsStore, StoreError};
