//! Streaming device capability
//!
//! Abstracts the host's media element (browser `<audio>`, a native decoder,
//! a test double). The controller is the only writer of the device; the
//! device talks back exclusively through [`DeviceEvent`]s delivered to
//! [`PlaybackController::handle_device_event`](crate::PlaybackController::handle_device_event).

use crate::error::DeviceError;
use crate::types::LoadId;

/// Platform-provided streaming primitive
///
/// Every method returns immediately; buffering and network latency happen
/// out of band and are observed only through later events. Implementors
/// must stamp every event with the [`LoadId`] passed to the `load` it
/// belongs to, and must register their event sources once for the lifetime
/// of the device, never per load.
pub trait MediaDevice {
    /// Begin loading a media resource
    ///
    /// # Errors
    /// Returns an error if the locator is rejected synchronously
    fn load(&mut self, url: &str, load: LoadId) -> Result<(), DeviceError>;

    /// Start or continue output of the loaded resource
    ///
    /// # Errors
    /// Returns an error if the device refuses synchronously
    fn play(&mut self) -> Result<(), DeviceError>;

    /// Suspend output
    fn pause(&mut self);

    /// Current play-head in seconds
    fn position(&self) -> f64;

    /// Move the play-head
    fn seek(&mut self, seconds: f64);

    /// Current output gain (0.0-1.0)
    fn volume(&self) -> f64;

    /// Set output gain (0.0-1.0)
    fn set_volume(&mut self, level: f64);
}

/// Event reported by the device, tagged with its load
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceEvent {
    /// Load this event belongs to
    pub load: LoadId,

    /// What happened
    pub kind: DeviceEventKind,
}

impl DeviceEvent {
    /// Play-head advanced
    pub fn time_update(load: LoadId, position: f64) -> Self {
        Self {
            load,
            kind: DeviceEventKind::TimeUpdate { position },
        }
    }

    /// Metadata loaded, duration known
    pub fn duration_known(load: LoadId, duration: f64) -> Self {
        Self {
            load,
            kind: DeviceEventKind::DurationKnown { duration },
        }
    }

    /// Playback reached the end of the resource
    pub fn finished(load: LoadId) -> Self {
        Self {
            load,
            kind: DeviceEventKind::Finished,
        }
    }

    /// Load or playback failed asynchronously
    pub fn failed(load: LoadId, message: impl Into<String>) -> Self {
        Self {
            load,
            kind: DeviceEventKind::Failed {
                message: message.into(),
            },
        }
    }
}

/// Kinds of device event
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEventKind {
    /// Elapsed seconds, high frequency
    TimeUpdate { position: f64 },

    /// Authoritative duration in seconds, once per load
    DurationKnown { duration: f64 },

    /// Natural end of the resource
    Finished,

    /// Asynchronous load/playback failure
    Failed { message: String },
}

/// Device that is built the first time the controller needs it
pub(crate) struct LazyDevice<D> {
    state: LazyState<D>,
}

type Factory<D> = Box<dyn FnOnce() -> Result<D, DeviceError>>;

enum LazyState<D> {
    Pending(Factory<D>),
    Ready(D),
    Failed,
}

impl<D> LazyDevice<D> {
    pub(crate) fn new(factory: impl FnOnce() -> Result<D, DeviceError> + 'static) -> Self {
        Self {
            state: LazyState::Pending(Box::new(factory)),
        }
    }

    pub(crate) fn ready(device: D) -> Self {
        Self {
            state: LazyState::Ready(device),
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        matches!(self.state, LazyState::Ready(_))
    }

    /// The device, if it has been built
    pub(crate) fn get(&self) -> Option<&D> {
        match &self.state {
            LazyState::Ready(device) => Some(device),
            LazyState::Pending(_) | LazyState::Failed => None,
        }
    }

    /// The device, if it has been built, without building it
    pub(crate) fn built_mut(&mut self) -> Option<&mut D> {
        match &mut self.state {
            LazyState::Ready(device) => Some(device),
            LazyState::Pending(_) | LazyState::Failed => None,
        }
    }

    /// The device, building it on first call
    ///
    /// A factory runs at most once. If it fails, every later call reports
    /// the device as unavailable.
    pub(crate) fn get_or_build(&mut self) -> Result<&mut D, DeviceError> {
        if matches!(self.state, LazyState::Pending(_)) {
            if let LazyState::Pending(factory) = std::mem::replace(&mut self.state, LazyState::Failed) {
                self.state = LazyState::Ready(factory()?);
            }
        }
        self.built_mut().ok_or(DeviceError::Unavailable)
    }
}
