//! Encore - Playback Control
//!
//! Platform-agnostic playback controller for Encore.
//!
//! This crate provides:
//! - A single owner of transport state (current track, playing, position,
//!   duration, volume) and of the streaming device
//! - Playlist navigation with wraparound in both directions
//! - Generation-tagged device events, so a superseded load can never
//!   overwrite newer state or double-advance the playlist
//! - Observers notified once per state change, plus a drainable event queue
//! - Volume clamping and mute
//!
//! # Architecture
//!
//! `encore-playback` knows nothing about where audio comes from:
//! - The host supplies a [`MediaDevice`] (browser `<audio>`, a native
//!   decoder, a test double)
//! - The device reports back through [`DeviceEvent`]s that the host feeds
//!   into [`PlaybackController::handle_device_event`]
//! - The catalog owner pushes tracks in with
//!   [`PlaybackController::set_playlist`]
//!
//! With the `wasm` feature the crate also ships a browser device backed by
//! `HTMLAudioElement` and a JS-facing wrapper.
//!
//! # Example
//!
//! ```rust
//! use encore_core::Track;
//! use encore_playback::{
//!     DeviceError, DeviceEvent, LoadId, MediaDevice, PlaybackConfig, PlaybackController,
//! };
//!
//! struct NullDevice;
//!
//! impl MediaDevice for NullDevice {
//!     fn load(&mut self, _url: &str, _load: LoadId) -> Result<(), DeviceError> { Ok(()) }
//!     fn play(&mut self) -> Result<(), DeviceError> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn position(&self) -> f64 { 0.0 }
//!     fn seek(&mut self, _seconds: f64) {}
//!     fn volume(&self) -> f64 { 1.0 }
//!     fn set_volume(&mut self, _level: f64) {}
//! }
//!
//! let a = Track::new("a", "First", "Artist", "https://cdn.example.com/a.mp3");
//! let b = Track::new("b", "Second", "Artist", "https://cdn.example.com/b.mp3");
//!
//! let mut controller = PlaybackController::new(PlaybackConfig::default(), || Ok(NullDevice));
//! controller.set_playlist(vec![a.clone(), b]);
//! controller.play(a);
//!
//! // The device finished the first track: auto-advance
//! let load = controller.current_load();
//! controller.handle_device_event(DeviceEvent::finished(load));
//! assert_eq!(controller.current_track().unwrap().id.as_str(), "b");
//! ```

mod controller;
mod device;
mod display;
mod error;
mod events;
pub mod navigation;
mod observers;
mod slot;
mod state;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use controller::PlaybackController;
pub use device::{DeviceEvent, DeviceEventKind, MediaDevice};
pub use display::format_clock;
pub use error::{DeviceError, PlaybackError, Result};
pub use events::PlaybackEvent;
pub use navigation::{navigate, wrapped_index, Playlist};
pub use observers::SubscriptionId;
pub use slot::{ControllerSlot, SharedController};
pub use state::TransportState;
pub use types::{Direction, LoadId, PlaybackConfig, PlaybackFault, PlaybackState};
pub use volume::Volume;
