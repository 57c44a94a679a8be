//! Playback Events
//!
//! Discrete notifications for hosts that poll instead of subscribing.
//! Events are queued at key points:
//! - State changes (playing/paused)
//! - Track changes (every successful `play`, manual or automatic)
//! - Natural end of a track
//! - Duration becoming known, volume changes, playlist replacement
//! - Device failures
//!
//! Time updates never queue an event; observers read the position instead.

use crate::types::{LoadId, PlaybackState};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track was loaded
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Device reported the authoritative duration
    DurationKnown {
        /// Duration in seconds
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f64,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Playlist replaced
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Device failed to load or play
    LoadFailed {
        /// ID of the track that failed
        track_id: String,
        /// Load the failure belongs to
        load: LoadId,
        /// Device message
        message: String,
    },
}

/// Bounded FIFO of undrained events
///
/// When full, the oldest event is dropped to make room.
#[derive(Debug, Clone)]
pub(crate) struct EventQueue {
    events: VecDeque<PlaybackEvent>,
    capacity: usize,
}

impl EventQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, event: PlaybackEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
