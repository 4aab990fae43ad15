//! Scaffolding command implementation.

use anyhow::{Context, Result};
use inkwell_core::{scaffold, Collection, Config};
use std::path::Path;

/// Create a stub markdown file for `title` in the scaffold root
pub fn new_entry(config_path: &Path, collection: Collection, title: &str) -> Result<()> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    let root = config.scaffold_root();

    let path = scaffold::create_entry(&root, collection, title, chrono::Utc::now())
        .with_context(|| format!("Failed to create {} \"{}\"", collection, title))?;

    tracing::debug!("Scaffolded {:?}", path);
    println!("Created new {}: {}", collection, path.display());
    Ok(())
}
