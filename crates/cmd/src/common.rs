// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use content::ContentStore;
use serde::de::DeserializeOwned;
use sitegen::{SiteConfig, load_config};

/// Which form schema a JSON document follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormKind {
    /// Contact form (name, email, subject, message, privacy)
    Contact,
    /// Document request form
    Documents,
}

/// Everything a command needs: the merged site config and the content store.
pub struct SiteContext {
    pub config: SiteConfig,
    pub store: ContentStore,
}

impl SiteContext {
    /// Load `config_path` over the built-in defaults and open `content_dir`.
    pub fn load(config_path: Option<&Path>, content_dir: PathBuf) -> Result<Self> {
        let config = load_config(config_path).with_context(|| match config_path {
            Some(path) => format!("Failed to load site config {}", path.display()),
            None => "Failed to load default site config".to_string(),
        })?;
        log::debug!(
            "Site '{}' with content at {}",
            config.site.name,
            content_dir.display()
        );
        Ok(Self::new(config, ContentStore::open(content_dir)))
    }

    pub fn new(config: SiteConfig, store: ContentStore) -> Self {
        Self { config, store }
    }
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}
