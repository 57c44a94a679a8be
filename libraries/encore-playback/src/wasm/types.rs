//! WASM-compatible type definitions

use crate::{PlaybackFault, PlaybackState, TransportState};
use encore_core::Track;
use serde::Serialize;

/// Serializable view of the transport, handed to JS observers
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TransportSnapshot<'a> {
    pub state: PlaybackState,
    pub current_track: Option<&'a Track>,
    pub is_playing: bool,
    pub position: f64,
    pub duration: f64,
    pub progress: f64,
    pub volume: f64,
    pub is_muted: bool,
    pub playlist_index: usize,
    pub fault: Option<&'a PlaybackFault>,
}

impl<'a> From<&'a TransportState> for TransportSnapshot<'a> {
    fn from(state: &'a TransportState) -> Self {
        Self {
            state: state.state(),
            current_track: state.current_track(),
            is_playing: state.is_playing(),
            position: state.position(),
            duration: state.duration(),
            progress: state.progress(),
            volume: state.volume(),
            is_muted: state.is_muted(),
            playlist_index: state.playlist_index(),
            fault: state.fault(),
        }
    }
}
