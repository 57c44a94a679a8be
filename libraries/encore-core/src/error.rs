/// Core error types for Encore
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Encore
#[derive(Error, Debug)]
pub enum CoreError {
    /// The catalog could not be reached or answered with a failure
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// The catalog answered, but the payload was not a valid track list
    #[error("Malformed catalog payload: {0}")]
    MalformedCatalog(String),

    /// The catalog refused the configured credentials
    #[error("Catalog access denied: {0}")]
    AccessDenied(String),
}

impl CoreError {
    /// Create a catalog-unavailable error
    pub fn catalog_unavailable(msg: impl Into<String>) -> Self {
        Self::CatalogUnavailable(msg.into())
    }

    /// Whether the caller should offer a retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::CatalogUnavailable(_))
    }
}
