//! Playback controller - core orchestration
//!
//! Owns the transport state and the streaming device, resolves playlist
//! navigation, and folds asynchronous device events back into state.

use crate::{
    device::{DeviceEvent, DeviceEventKind, LazyDevice, MediaDevice},
    error::DeviceError,
    events::{EventQueue, PlaybackEvent},
    navigation::Playlist,
    observers::{ObserverRegistry, SubscriptionId},
    state::TransportState,
    types::{Direction, LoadId, PlaybackConfig, PlaybackFault, PlaybackState},
};
use encore_core::Track;
use tracing::{debug, trace, warn};

/// Single authoritative owner of "what is playing and where"
///
/// All commands run to completion and return immediately; the device's
/// buffering happens out of band and comes back through
/// [`handle_device_event`](Self::handle_device_event). Commands issued in
/// a state where they make no sense (pause while paused, next on an empty
/// playlist) are silent no-ops. Device failures never escape: they land on
/// the transport state as a [`PlaybackFault`].
///
/// Observers registered with [`subscribe`](Self::subscribe) are called
/// exactly once after each logical state change.
pub struct PlaybackController<D: MediaDevice> {
    device: LazyDevice<D>,
    playlist: Playlist,
    state: TransportState,

    // Generation of the most recent load; events tagged otherwise are stale
    load: LoadId,
    // Whether `state.duration` was reported for `load` rather than carried over
    duration_confirmed: bool,
    clamp_seek: bool,

    observers: ObserverRegistry,
    events: EventQueue,
}

impl<D: MediaDevice> PlaybackController<D> {
    /// Create a controller whose device is built on first playback
    ///
    /// The factory runs at most once, on the first `play`. If it fails the
    /// track is marked faulted and every later load reports the device as
    /// unavailable.
    pub fn new(
        config: PlaybackConfig,
        factory: impl FnOnce() -> Result<D, DeviceError> + 'static,
    ) -> Self {
        Self::from_parts(&config, LazyDevice::new(factory))
    }

    /// Create a controller around an already constructed device
    pub fn with_device(config: PlaybackConfig, device: D) -> Self {
        let mut controller = Self::from_parts(&config, LazyDevice::ready(device));
        let level = controller.state.volume.effective();
        if let Some(device) = controller.device.built_mut() {
            device.set_volume(level);
        }
        controller
    }

    fn from_parts(config: &PlaybackConfig, device: LazyDevice<D>) -> Self {
        Self {
            device,
            playlist: Playlist::default(),
            state: TransportState::new(config.initial_volume),
            load: LoadId::NONE,
            duration_confirmed: false,
            clamp_seek: config.clamp_seek,
            observers: ObserverRegistry::default(),
            events: EventQueue::new(config.event_buffer),
        }
    }

    // ===== Playlist =====

    /// Replace the active playlist
    ///
    /// Transport is untouched: whatever is playing keeps playing. If the
    /// current track is in the new playlist its index is re-derived from
    /// identity, so navigation continues from the right slot.
    pub fn set_playlist(&mut self, tracks: Vec<Track>) {
        self.playlist.replace(tracks);

        let index = self
            .state
            .current
            .as_ref()
            .and_then(|track| self.playlist.position_of(&track.id));
        if let Some(index) = index {
            self.state.index = index;
        }

        debug!(tracks = self.playlist.len(), "Playlist replaced");
        self.events.push(PlaybackEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
        self.notify();
    }

    /// Active playlist
    pub fn playlist(&self) -> &[Track] {
        self.playlist.tracks()
    }

    // ===== Transport =====

    /// Load `track` and start playing it
    ///
    /// The playing flag is set before the device confirms anything. The
    /// playlist index is re-derived by identity; if `track` is not in the
    /// playlist the previous index is kept.
    pub fn play(&mut self, track: Track) {
        let index = self.playlist.position_of(&track.id);
        self.start(track, index);
        self.notify();
    }

    /// Suspend output
    pub fn pause(&mut self) {
        if self.state.current.is_none() || !self.state.playing {
            return;
        }

        if let Some(device) = self.device.built_mut() {
            device.pause();
        }
        self.state.playing = false;
        self.emit_state_changed();
        self.notify();
    }

    /// Continue output from the current position
    ///
    /// A successful resume clears any recorded fault.
    pub fn resume(&mut self) {
        if self.state.current.is_none() || self.state.playing {
            return;
        }

        let result = match self.device.built_mut() {
            Some(device) => device.play(),
            None => Err(DeviceError::Unavailable),
        };

        match result {
            Ok(()) => {
                self.state.playing = true;
                self.state.fault = None;
                self.emit_state_changed();
            }
            Err(err) => self.record_fault(self.load, err.to_string()),
        }
        self.notify();
    }

    /// Song-card click: pause/resume the current track, or play another
    pub fn toggle(&mut self, track: Track) {
        let is_current = self
            .state
            .current
            .as_ref()
            .is_some_and(|current| current.same_as(&track));

        if !is_current {
            self.play(track);
        } else if self.state.playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Play the following playlist entry, wrapping to the first
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if self.step(Direction::Next) {
            self.notify();
        }
    }

    /// Play the preceding playlist entry, wrapping to the last
    ///
    /// Always moves one slot back, however far into the track playback is.
    pub fn previous(&mut self) {
        if self.step(Direction::Previous) {
            self.notify();
        }
    }

    // ===== Seek =====

    /// Move the play-head to `seconds`
    ///
    /// Ignored when nothing is loaded. Negative targets clamp to zero; once
    /// the device has reported this track's duration, targets past the end
    /// clamp to it.
    pub fn seek_to(&mut self, seconds: f64) {
        if self.state.current.is_none() || !seconds.is_finite() {
            return;
        }

        let mut target = seconds.max(0.0);
        if self.clamp_seek && self.duration_confirmed {
            target = target.min(self.state.duration);
        }

        if let Some(device) = self.device.built_mut() {
            device.seek(target);
        }

        if target != self.state.position {
            self.state.position = target;
            self.notify();
        }
    }

    /// Seek by fraction of the known duration
    ///
    /// No-op until the device has reported this track's duration.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if !self.duration_confirmed || self.state.duration <= 0.0 || !fraction.is_finite() {
            return;
        }
        self.seek_to(fraction.clamp(0.0, 1.0) * self.state.duration);
    }

    // ===== Volume =====

    /// Set output level, clamped into `[0, 1]`
    ///
    /// Raising the level above zero while muted unmutes.
    pub fn set_volume(&mut self, level: f64) {
        if self.state.volume.set_level(level) {
            self.apply_volume();
        }
    }

    /// Silence output, keeping the level
    pub fn mute(&mut self) {
        if self.state.volume.mute() {
            self.apply_volume();
        }
    }

    /// Restore the level kept by `mute`
    pub fn unmute(&mut self) {
        if self.state.volume.unmute() {
            self.apply_volume();
        }
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.state.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Device events =====

    /// Single dispatch point for everything the device reports
    ///
    /// Events tagged with any load other than the latest are dropped, so a
    /// late time update or completion from a superseded track cannot
    /// overwrite newer state or trigger a second advance.
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        if event.load != self.load || self.state.current.is_none() {
            trace!(
                load = event.load.get(),
                current = self.load.get(),
                "Discarding stale device event"
            );
            return;
        }

        match event.kind {
            DeviceEventKind::TimeUpdate { position } => {
                if position.is_finite() && position != self.state.position {
                    self.state.position = position.max(0.0);
                    self.notify();
                }
            }
            DeviceEventKind::DurationKnown { duration } => {
                // Live streams report an infinite duration; keep the old value
                if !duration.is_finite() || duration < 0.0 {
                    debug!(duration, "Ignoring unusable duration");
                    return;
                }
                self.state.duration = duration;
                self.duration_confirmed = true;
                self.events.push(PlaybackEvent::DurationKnown { duration });
                self.notify();
            }
            DeviceEventKind::Finished => self.on_finished(),
            DeviceEventKind::Failed { message } => {
                // Element error and rejected play() both report one failure
                if self.state.fault.as_ref().is_some_and(|f| f.load == event.load) {
                    trace!(load = event.load.get(), "Load already faulted");
                    return;
                }
                self.record_fault(event.load, message);
                self.notify();
            }
        }
    }

    fn on_finished(&mut self) {
        if let Some(track) = &self.state.current {
            debug!(track = %track.id, "Track finished");
            self.events.push(PlaybackEvent::TrackFinished {
                track_id: track.id.to_string(),
            });
        }

        if !self.step(Direction::Next) {
            // Nothing to advance to; the device stopped on its own
            self.state.playing = false;
            self.emit_state_changed();
        }
        self.notify();
    }

    // ===== Observers & events =====

    /// Register an observer called after every state change
    pub fn subscribe(&mut self, observer: impl FnMut(&TransportState) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    // ===== State Queries =====

    /// Read-only view of the transport
    pub fn state(&self) -> &TransportState {
        &self.state
    }

    /// Coarse playback state
    pub fn playback_state(&self) -> PlaybackState {
        self.state.state()
    }

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track()
    }

    /// Whether output is (optimistically) running
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Play-head in seconds
    pub fn position(&self) -> f64 {
        self.state.position()
    }

    /// Last reported duration in seconds
    pub fn duration(&self) -> f64 {
        self.state.duration()
    }

    /// Stored volume level
    pub fn volume(&self) -> f64 {
        self.state.volume()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.state.is_muted()
    }

    /// Index of the current track in the playlist
    pub fn playlist_index(&self) -> usize {
        self.state.playlist_index()
    }

    /// Last device failure
    pub fn fault(&self) -> Option<&PlaybackFault> {
        self.state.fault()
    }

    /// Tag of the most recent load
    pub fn current_load(&self) -> LoadId {
        self.load
    }

    /// The device, if it has been built
    pub fn device(&self) -> Option<&D> {
        self.device.get()
    }

    // ===== Internals =====

    fn step(&mut self, direction: Direction) -> bool {
        let Some((index, track)) = self.playlist.step(self.state.index, direction) else {
            debug!(?direction, "Playlist empty, not navigating");
            return false;
        };
        let track = track.clone();
        self.start(track, Some(index));
        true
    }

    /// Load and play without notifying observers
    ///
    /// `index` is the playlist slot to record; `None` keeps the old one.
    /// Duration and position are left as they are until the new load
    /// reports its own values.
    fn start(&mut self, track: Track, index: Option<usize>) {
        let load = self.load.next();
        self.load = load;
        self.duration_confirmed = false;

        debug!(track = %track.id, load = load.get(), "Loading track");

        let fresh = !self.device.is_ready();
        let level = self.state.volume.effective();
        let outcome = match self.device.get_or_build() {
            Ok(device) => {
                if fresh {
                    device.set_volume(level);
                }
                match device.load(&track.media_url, load) {
                    Ok(()) => device.play(),
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        };

        let track_id = track.id.to_string();
        let previous = self.state.current.replace(track);
        if let Some(index) = index {
            self.state.index = index;
        }
        self.state.fault = None;
        self.events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id: previous.map(|t| t.id.to_string()),
        });

        let was_playing = self.state.playing;
        match outcome {
            Ok(()) => {
                self.state.playing = true;
                if !was_playing {
                    self.emit_state_changed();
                }
            }
            Err(err) => self.record_fault(load, err.to_string()),
        }
    }

    /// Mark the current track failed and stop claiming playback
    fn record_fault(&mut self, load: LoadId, message: String) {
        let Some(track) = &self.state.current else {
            return;
        };
        warn!(track = %track.id, load = load.get(), error = %message, "Playback failed");

        let track_id = track.id.clone();
        self.events.push(PlaybackEvent::LoadFailed {
            track_id: track_id.to_string(),
            load,
            message: message.clone(),
        });
        self.state.fault = Some(PlaybackFault {
            track_id,
            load,
            message,
        });

        if self.state.playing {
            self.state.playing = false;
            self.emit_state_changed();
        }
    }

    fn apply_volume(&mut self) {
        let level = self.state.volume.effective();
        if let Some(device) = self.device.built_mut() {
            device.set_volume(level);
        }
        self.events.push(PlaybackEvent::VolumeChanged {
            level: self.state.volume.level(),
            is_muted: self.state.volume.is_muted(),
        });
        self.notify();
    }

    fn emit_state_changed(&mut self) {
        self.events.push(PlaybackEvent::StateChanged {
            state: self.state.state(),
        });
    }

    fn notify(&mut self) {
        self.observers.notify(&self.state);
    }
}
