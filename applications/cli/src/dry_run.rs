//! Device that walks the playlist without producing audio

use encore_playback::{DeviceError, LoadId, MediaDevice};
use tracing::debug;

/// Accepts every load and remembers where it was told to be
#[derive(Debug, Default)]
pub struct DryRunDevice {
    position: f64,
    volume: f64,
}

impl MediaDevice for DryRunDevice {
    fn load(&mut self, url: &str, load: LoadId) -> Result<(), DeviceError> {
        if url.is_empty() {
            return Err(DeviceError::LoadRejected("track has no media url".into()));
        }
        debug!(url = %url, load = load.get(), "Dry-run load");
        self.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, level: f64) {
        self.volume = level;
    }
}
