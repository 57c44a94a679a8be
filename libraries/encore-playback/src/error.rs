//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Transport commands never return these: misuse is a no-op and device
/// failures surface as a fault on the transport state. Only the wiring
/// around the controller can fail.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The controller was requested before the composition point installed it
    #[error("Playback controller used before it was installed")]
    NotInstalled,

    /// A second controller was installed into an occupied slot
    #[error("Playback controller already installed")]
    AlreadyInstalled,

    /// The controller is borrowed elsewhere (re-entrant call from a callback)
    #[error("Playback controller is busy")]
    Busy,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Failures reported by a streaming device
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The media locator could not be loaded
    #[error("Load rejected: {0}")]
    LoadRejected(String),

    /// The device refused to start output
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// The device could not be constructed
    #[error("Device unavailable")]
    Unavailable,
}
