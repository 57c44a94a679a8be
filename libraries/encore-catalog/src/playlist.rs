//! Catalog to controller hand-off

use encore_core::{tracks_in_category, CatalogSource, CategoryId};
use encore_playback::{MediaDevice, PlaybackController};
use tracing::debug;

/// Which part of the catalog becomes the active playlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaylistScope {
    /// Every track, in catalog order
    #[default]
    All,
    /// Tracks filed under one category
    Category(CategoryId),
    /// Tracks without a category
    Uncategorized,
}

impl PlaylistScope {
    fn category(&self) -> Option<Option<&CategoryId>> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(Some(id)),
            Self::Uncategorized => Some(None),
        }
    }
}

/// Fetch the catalog and install it as the controller's playlist
///
/// Returns the playlist length. On failure the controller is left
/// untouched so the caller can offer a retry.
pub async fn load_playlist<D: MediaDevice>(
    catalog: &dyn CatalogSource,
    controller: &mut PlaybackController<D>,
    scope: &PlaylistScope,
) -> encore_core::Result<usize> {
    let tracks = catalog.fetch_tracks().await?;
    let tracks = match scope.category() {
        None => tracks,
        Some(category) => tracks_in_category(&tracks, category),
    };

    debug!(tracks = tracks.len(), scope = ?scope, "Installing playlist");
    let len = tracks.len();
    controller.set_playlist(tracks);
    Ok(len)
}
