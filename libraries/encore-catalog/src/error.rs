//! Error types for the catalog client.

use encore_core::CoreError;
use thiserror::Error;

/// Errors that can occur when talking to the hosted catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Invalid catalog URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// No API key configured
    #[error("Catalog API key is missing")]
    MissingApiKey,

    /// The store rejected the API key
    #[error("Catalog rejected credentials ({status})")]
    Unauthorized { status: u16 },

    /// Store returned an error response
    #[error("Catalog error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Store is offline or unreachable
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),

    /// Failed to parse store response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ParseError(msg) => CoreError::MalformedCatalog(msg),
            denied @ (CatalogError::Unauthorized { .. } | CatalogError::MissingApiKey) => {
                CoreError::AccessDenied(denied.to_string())
            }
            other => CoreError::catalog_unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_not_retryable() {
        let core: CoreError = CatalogError::ParseError("expected array".into()).into();
        assert!(matches!(core, CoreError::MalformedCatalog(_)));
        assert!(!core.is_retryable());
    }

    #[test]
    fn rejected_credentials_are_not_retryable() {
        let core: CoreError = CatalogError::Unauthorized { status: 401 }.into();
        assert!(matches!(core, CoreError::AccessDenied(_)));
        assert!(!core.is_retryable());
        assert!(core.to_string().contains("401"));
    }

    #[test]
    fn transport_errors_are_retryable() {
        let core: CoreError = CatalogError::ServerError {
            status: 503,
            message: "maintenance".into(),
        }
        .into();
        assert!(core.is_retryable());
        assert!(core.to_string().contains("503"));
    }
}
