//! folio-rs: a markdown-backed portfolio and blog server
//!
//! Posts live as front-matter + markdown files in a content directory and
//! are re-read on every request; the HTTP layer exposes listing, tag and
//! search endpoints alongside the prebuilt static front-end.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod search;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application handle
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding post markdown files
    pub content_dir: PathBuf,
    /// Prebuilt front-end assets served as-is
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            static_dir,
        })
    }

    /// Repository over this site's content directory.
    pub fn repository(&self) -> content::PostRepository {
        let store = content::ContentStore::new(&self.content_dir);
        content::PostRepository::new(store, self.config.words_per_minute)
    }
}
