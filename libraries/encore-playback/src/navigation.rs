//! Playlist navigation
//!
//! The active playlist and the pure wraparound arithmetic over it.

use crate::types::Direction;
use encore_core::{Track, TrackId};

/// Index reached by moving one slot in `direction` from `current`
///
/// Wraps past either end. `None` for an empty playlist. A `current` that
/// is out of range (stale after a playlist replacement) is reduced modulo
/// `len` first.
pub fn wrapped_index(len: usize, current: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let current = current % len;
    Some(match direction {
        Direction::Next => (current + 1) % len,
        Direction::Previous => {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        }
    })
}

/// Track reached by moving one slot in `direction` from `current`
pub fn navigate(tracks: &[Track], current: usize, direction: Direction) -> Option<(usize, &Track)> {
    let index = wrapped_index(tracks.len(), current, direction)?;
    tracks.get(index).map(|track| (index, track))
}

/// Ordered sequence of tracks subject to next/previous
///
/// Replaced wholesale by the catalog owner; insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist from catalog order
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Replace every entry
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// First index holding a track with this identity
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Neighbour of `current` in `direction`
    pub fn step(&self, current: usize, direction: Direction) -> Option<(usize, &Track)> {
        navigate(&self.tracks, current, direction)
    }
}
