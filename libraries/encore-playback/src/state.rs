//! Transport state
//!
//! The single record of what is loaded, whether it plays, and where the
//! play-head is. Only the controller writes it; observers get `&TransportState`.

use crate::types::{PlaybackFault, PlaybackState};
use crate::volume::Volume;
use encore_core::Track;

/// Mutable transport record owned by the controller
#[derive(Debug, Clone)]
pub struct TransportState {
    pub(crate) current: Option<Track>,
    pub(crate) playing: bool,
    pub(crate) position: f64,
    pub(crate) duration: f64,
    pub(crate) volume: Volume,
    pub(crate) index: usize,
    pub(crate) fault: Option<PlaybackFault>,
}

impl TransportState {
    pub(crate) fn new(initial_volume: f64) -> Self {
        Self {
            current: None,
            playing: false,
            position: 0.0,
            duration: 0.0,
            volume: Volume::new(initial_volume),
            index: 0,
            fault: None,
        }
    }

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Whether output is (optimistically) running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Coarse state
    pub fn state(&self) -> PlaybackState {
        match (&self.current, self.playing) {
            (None, _) => PlaybackState::Empty,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Play-head in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration in seconds as last reported by the device
    ///
    /// Zero before the first load completes. Across a track switch this
    /// keeps the previous track's value until the new load reports its own.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Stored volume level (0.0-1.0), regardless of mute
    pub fn volume(&self) -> f64 {
        self.volume.level()
    }

    /// Whether output is muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Index of the current track in the active playlist
    ///
    /// Meaningful only while the current track is a playlist member.
    pub fn playlist_index(&self) -> usize {
        self.index
    }

    /// Last device failure, cleared by the next `play` or a successful `resume`
    pub fn fault(&self) -> Option<&PlaybackFault> {
        self.fault.as_ref()
    }

    /// Position as a fraction of duration, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
