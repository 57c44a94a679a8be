//! Encore Catalog
//!
//! Client for the hosted table store that holds Encore's songs and
//! categories.
//!
//! # Features
//!
//! - **Configuration**: `encore.toml` plus `ENCORE_CATALOG__*` overrides
//! - **Catalog**: songs and categories over the store's REST endpoint
//! - **Playlist hand-off**: push a fetched (optionally category-scoped)
//!   catalog into a playback controller
//!
//! # Example
//!
//! ```ignore
//! use encore_catalog::{load_playlist, CatalogConfig, HttpCatalog, PlaylistScope};
//!
//! let catalog = HttpCatalog::new(CatalogConfig::load(None)?)?;
//! let count = load_playlist(&catalog, &mut controller, &PlaylistScope::All).await?;
//! println!("Playlist has {} tracks", count);
//! ```

mod client;
mod config;
mod error;
mod playlist;

pub use client::HttpCatalog;
pub use config::{CatalogConfig, DEFAULT_CONFIG_FILE};
pub use error::{CatalogError, Result};
pub use playlist::{load_playlist, PlaylistScope};
