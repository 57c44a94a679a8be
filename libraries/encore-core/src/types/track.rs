/// Track domain type
use crate::types::{CategoryId, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable song from the catalog
///
/// Field names on the wire follow the catalog table columns, so a row
/// fetched from the store deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// URL the streaming device can load
    #[serde(rename = "file_url")]
    pub media_url: String,

    /// Cover art URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,

    /// Duration in seconds as stored in the catalog
    ///
    /// Advisory only. The device reports the authoritative value once the
    /// media is loaded, and the two may disagree.
    #[serde(rename = "duration", default)]
    pub duration_secs: f64,

    /// Number of likes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,

    /// Number of plays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_count: Option<u64>,

    /// Category the track is filed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            album: None,
            media_url: media_url.into(),
            cover_image_url: None,
            duration_secs: 0.0,
            like_count: None,
            play_count: None,
            category_id: None,
        }
    }

    /// Set the catalog duration in seconds
    #[must_use]
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// File the track under a category
    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category_id = Some(category);
        self
    }

    /// Catalog duration as a `Duration`
    ///
    /// Negative or non-finite values read as zero.
    pub fn nominal_duration(&self) -> Duration {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            Duration::from_secs_f64(self.duration_secs)
        } else {
            Duration::ZERO
        }
    }

    /// Whether `other` is the same catalog entry
    pub fn same_as(&self, other: &Track) -> bool {
        self.id == other.id
    }
}
