/// Collaborator traits for Encore
use crate::error::Result;
use crate::types::{Category, Track};
use async_trait::async_trait;

/// Source of the song catalog
///
/// The catalog owner fetches tracks through this trait and pushes them into
/// the playback controller as the active playlist. Implementations are
/// request/response only; a failure is recoverable and the caller decides
/// whether to show a retry or an empty state.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every track, in display order
    ///
    /// # Errors
    /// Returns an error if the catalog is unreachable or the payload is malformed
    async fn fetch_tracks(&self) -> Result<Vec<Track>>;

    /// Fetch every category
    ///
    /// # Errors
    /// Returns an error if the catalog is unreachable or the payload is malformed
    async fn fetch_categories(&self) -> Result<Vec<Category>>;
}
