//! WASM-compatible controller wrapper

use super::device::HtmlAudioDevice;
use super::types::TransportSnapshot;
use crate::{format_clock, PlaybackConfig, PlaybackController, PlaybackError, SubscriptionId};
use encore_core::Track;
use js_sys::Function;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::warn;
use wasm_bindgen::prelude::*;

type Inner = RefCell<PlaybackController<HtmlAudioDevice>>;

/// Browser-facing playback controller
///
/// Owns the session's controller; the audio element it drives is created on
/// the first `play` and feeds its events straight back in.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Rc<Inner>,
    subscription: Option<SubscriptionId>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a new player
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let weak = weak.clone();
            RefCell::new(PlaybackController::new(PlaybackConfig::default(), move || {
                HtmlAudioDevice::new(move |event| {
                    let Some(inner) = weak.upgrade() else {
                        return;
                    };
                    match inner.try_borrow_mut() {
                        Ok(mut controller) => controller.handle_device_event(event),
                        Err(_) => warn!("Controller busy, dropping device event"),
                    };
                })
            }))
        });

        Self {
            inner,
            subscription: None,
        }
    }

    // ===== Playlist =====

    /// Replace the active playlist with catalog rows
    #[wasm_bindgen(js_name = setPlaylist)]
    pub fn set_playlist(&self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;
        self.with(|c| c.set_playlist(tracks))
    }

    // ===== Playback Control =====

    /// Load a catalog row and start playing it
    pub fn play(&self, track: JsValue) -> Result<(), JsValue> {
        let track = parse_track(track)?;
        self.with(|c| c.play(track))
    }

    /// Pause the row if it is current, otherwise play it
    pub fn toggle(&self, track: JsValue) -> Result<(), JsValue> {
        let track = parse_track(track)?;
        self.with(|c| c.toggle(track))
    }

    /// Pause playback
    pub fn pause(&self) -> Result<(), JsValue> {
        self.with(|c| c.pause())
    }

    /// Resume playback
    pub fn resume(&self) -> Result<(), JsValue> {
        self.with(|c| c.resume())
    }

    /// Skip to next track
    pub fn next(&self) -> Result<(), JsValue> {
        self.with(|c| c.next())
    }

    /// Go to previous track
    pub fn previous(&self) -> Result<(), JsValue> {
        self.with(|c| c.previous())
    }

    // ===== Seeking =====

    /// Seek to position in seconds
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&self, seconds: f64) -> Result<(), JsValue> {
        self.with(|c| c.seek_to(seconds))
    }

    /// Seek to position by fraction (0.0 - 1.0)
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&self, fraction: f64) -> Result<(), JsValue> {
        self.with(|c| c.seek_to_fraction(fraction))
    }

    // ===== Volume Control =====

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f64) -> Result<(), JsValue> {
        self.with(|c| c.set_volume(level))
    }

    /// Mute audio
    pub fn mute(&self) -> Result<(), JsValue> {
        self.with(|c| c.mute())
    }

    /// Unmute audio
    pub fn unmute(&self) -> Result<(), JsValue> {
        self.with(|c| c.unmute())
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) -> Result<(), JsValue> {
        self.with(|c| c.toggle_mute())
    }

    // ===== State Queries =====

    /// Current transport as a plain object
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        let controller = self
            .inner
            .try_borrow()
            .map_err(|_| to_js(PlaybackError::Busy))?;
        serde_wasm_bindgen::to_value(&TransportSnapshot::from(controller.state()))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Take pending controller events
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        let events = self.with(|c| c.drain_events())?;
        serde_wasm_bindgen::to_value(&events)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    // ===== Event Listeners =====

    /// Register the state change callback, replacing any previous one
    ///
    /// The callback receives the same shape as `getState()` and must not
    /// call back into the player synchronously.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: Function) -> Result<(), JsValue> {
        let previous = self.subscription.take();
        let id = self.with(move |c| {
            if let Some(id) = previous {
                c.unsubscribe(id);
            }
            c.subscribe(move |state| {
                if let Ok(snapshot) = serde_wasm_bindgen::to_value(&TransportSnapshot::from(state)) {
                    callback.call1(&JsValue::NULL, &snapshot).ok();
                }
            })
        })?;
        self.subscription = Some(id);
        Ok(())
    }

    fn with<R>(&self, f: impl FnOnce(&mut PlaybackController<HtmlAudioDevice>) -> R) -> Result<R, JsValue> {
        let mut controller = self
            .inner
            .try_borrow_mut()
            .map_err(|_| to_js(PlaybackError::Busy))?;
        Ok(f(&mut controller))
    }
}

/// Default implementation
impl Default for WasmPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render seconds as `m:ss`
#[wasm_bindgen(js_name = formatClock)]
pub fn format_clock_js(seconds: f64) -> String {
    format_clock(seconds)
}

fn parse_track(value: JsValue) -> Result<Track, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse track: {}", e)))
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
