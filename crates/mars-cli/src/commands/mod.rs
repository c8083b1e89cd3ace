pub mod deck;
pub mod init_config;
pub mod list;
pub mod run;
pub mod themes;

use std::path::Path;

use anyhow::{Context, Result};
use mars_core::ContentStore;

/// Read the content file for the non-interactive commands
pub(crate) fn load_store(path: &Path) -> Result<ContentStore> {
    ContentStore::from_path(path)
        .with_context(|| format!("Failed to load content from {}", path.display()))
}
