//! Core types for playback management

use encore_core::TrackId;
use serde::{Deserialize, Serialize};

/// Coarse transport status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Empty,

    /// Track loaded, output suspended
    Paused,

    /// Track loaded and (optimistically) producing audio
    Playing,
}

/// Navigation direction within the playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the end, wrapping to the first entry
    Next,

    /// Towards the start, wrapping to the last entry
    Previous,
}

/// Generation tag for a device load
///
/// Every `play` issues a fresh tag; device events carrying any other tag
/// belong to a superseded load and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadId(u64);

impl LoadId {
    /// Tag that precedes every real load
    pub const NONE: LoadId = LoadId(0);

    /// The tag issued after this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for LoadId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A device failure recorded against the track it happened on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackFault {
    /// Track whose load or playback failed
    pub track_id: TrackId,

    /// Load the failure belongs to
    pub load: LoadId,

    /// Device-provided description
    pub message: String,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub initial_volume: f64,

    /// Clamp seeks into `[0, duration]` once the duration is known (default: true)
    pub clamp_seek: bool,

    /// Maximum number of undrained controller events kept (default: 256)
    pub event_buffer: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            clamp_seek: true,
            event_buffer: 256,
        }
    }
}
