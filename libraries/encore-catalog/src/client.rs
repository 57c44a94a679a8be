//! HTTP catalog client.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use encore_core::{CatalogSource, Category, Track};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Catalog backed by a hosted table store's REST endpoint.
///
/// Rows are fetched with `select=*` from `{base_url}/rest/v1/{table}`,
/// authenticated with the project's public key.
///
/// # Example
///
/// ```ignore
/// use encore_catalog::{CatalogConfig, HttpCatalog};
///
/// let config = CatalogConfig::new("https://abc.supabase.co", "anon-key");
/// let catalog = HttpCatalog::new(config)?;
///
/// let tracks = catalog.tracks().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
pub struct HttpCatalog {
    http: Client,
    base_url: String,
    config: CatalogConfig,
}

impl HttpCatalog {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.normalized_url().to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Encore/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Normalized store URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every song, in the configured order.
    pub async fn tracks(&self) -> Result<Vec<Track>> {
        let tracks: Vec<Track> = self
            .rows(&self.config.table, Some(self.config.order_by.as_str()))
            .await?;
        info!(tracks = tracks.len(), "Fetched catalog");
        Ok(tracks)
    }

    /// Fetch every category, in the configured order.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let categories: Vec<Category> = self
            .rows(
                &self.config.categories_table,
                Some(self.config.categories_order_by.as_str()),
            )
            .await?;
        debug!(categories = categories.len(), "Fetched categories");
        Ok(categories)
    }

    async fn rows<T: DeserializeOwned>(&self, table: &str, order: Option<&str>) -> Result<Vec<T>> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!(url = %url, order = ?order, "Fetching rows");

        let mut query = vec![("select", "*")];
        if let Some(order) = order {
            query.push(("order", order));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    CatalogError::Unreachable(e.to_string())
                } else {
                    CatalogError::Request(e)
                }
            })?;

        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse {} rows: {}", table, e))
            })
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(CatalogError::Unauthorized {
                status: status.as_u16(),
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_tracks(&self) -> encore_core::Result<Vec<Track>> {
        Ok(self.tracks().await?)
    }

    async fn fetch_categories(&self) -> encore_core::Result<Vec<Category>> {
        Ok(self.categories().await?)
    }
}
