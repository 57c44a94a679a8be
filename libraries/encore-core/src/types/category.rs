/// Category domain type
use crate::types::{CategoryId, Track};
use serde::{Deserialize, Serialize};

/// A named grouping of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional artwork URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Category {
    /// Create a new category
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            description: None,
            image_url: None,
        }
    }
}

/// Tracks filed under `category`, in catalog order
///
/// `None` selects the uncategorized tracks.
pub fn tracks_in_category(tracks: &[Track], category: Option<&CategoryId>) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| t.category_id.as_ref() == category)
        .cloned()
        .collect()
}
