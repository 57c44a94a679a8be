//! Catalog configuration

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "encore.toml";

/// Connection settings for the hosted table store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub base_url: String,

    /// Public (anon) API key
    #[serde(default)]
    pub api_key: String,

    /// Table holding the songs
    #[serde(default = "default_table")]
    pub table: String,

    /// Table holding the categories
    #[serde(default = "default_categories_table")]
    pub categories_table: String,

    /// PostgREST ordering for songs
    #[serde(default = "default_order_by")]
    pub order_by: String,

    /// PostgREST ordering for categories
    #[serde(default = "default_order_by")]
    pub categories_order_by: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "songs".to_string()
}

fn default_categories_table() -> String {
    "categories".to_string()
}

fn default_order_by() -> String {
    "created_at.desc".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(default)]
    catalog: Option<CatalogConfig>,
}

impl CatalogConfig {
    /// Configuration for `base_url` with every other setting defaulted
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: default_table(),
            categories_table: default_categories_table(),
            order_by: default_order_by(),
            categories_order_by: default_order_by(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load the `[catalog]` table from file and environment
    ///
    /// Reads `path`, or `encore.toml` in the working directory if it exists,
    /// then applies `ENCORE_CATALOG__*` overrides
    /// (e.g. `ENCORE_CATALOG__API_KEY`). The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ENCORE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = settings.build()?.try_deserialize()?;
        let config = settings
            .catalog
            .unwrap_or_else(|| CatalogConfig::new("", ""));

        config.validate()?;
        Ok(config)
    }

    /// Check the URL scheme and that a key is present
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }
        let url = self.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }
        if self.table.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("table name cannot be empty".into()));
        }
        Ok(())
    }

    /// Base URL without trailing slashes
    pub fn normalized_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
