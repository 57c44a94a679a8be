//! Shared helpers for playback integration tests

#![allow(dead_code)]

use encore_core::Track;
use encore_playback::{DeviceError, LoadId, MediaDevice, PlaybackConfig, PlaybackController};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Everything the device was asked to do, shared with the test body
#[derive(Debug, Default)]
pub struct DeviceLog {
    pub loads: Vec<(String, LoadId)>,
    pub plays: usize,
    pub pauses: usize,
    pub seeks: Vec<f64>,
    pub volume: f64,
    pub position: f64,
}

/// Device double that records calls and rejects `bad://` locators
pub struct RecordingDevice {
    log: Rc<RefCell<DeviceLog>>,
}

impl MediaDevice for RecordingDevice {
    fn load(&mut self, url: &str, load: LoadId) -> Result<(), DeviceError> {
        if url.starts_with("bad://") {
            return Err(DeviceError::LoadRejected(format!("unsupported locator {url}")));
        }
        let mut log = self.log.borrow_mut();
        log.loads.push((url.to_string(), load));
        log.position = 0.0;
        Ok(())
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        self.log.borrow_mut().plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().pauses += 1;
    }

    fn position(&self) -> f64 {
        self.log.borrow().position
    }

    fn seek(&mut self, seconds: f64) {
        let mut log = self.log.borrow_mut();
        log.seeks.push(seconds);
        log.position = seconds;
    }

    fn volume(&self) -> f64 {
        self.log.borrow().volume
    }

    fn set_volume(&mut self, level: f64) {
        self.log.borrow_mut().volume = level;
    }
}

/// Controller wired to a recording device, plus handles to inspect it
pub struct Harness {
    pub controller: PlaybackController<RecordingDevice>,
    pub log: Rc<RefCell<DeviceLog>>,
    pub builds: Rc<Cell<usize>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(PlaybackConfig::default())
    }

    pub fn with_config(config: PlaybackConfig) -> Self {
        let log = Rc::new(RefCell::new(DeviceLog::default()));
        let builds = Rc::new(Cell::new(0));

        let factory_log = Rc::clone(&log);
        let factory_builds = Rc::clone(&builds);
        let controller = PlaybackController::new(config, move || {
            factory_builds.set(factory_builds.get() + 1);
            Ok(RecordingDevice { log: factory_log })
        });

        Self {
            controller,
            log,
            builds,
        }
    }

    /// Url of the most recent load
    pub fn last_url(&self) -> Option<String> {
        self.log.borrow().loads.last().map(|(url, _)| url.clone())
    }

    pub fn load_count(&self) -> usize {
        self.log.borrow().loads.len()
    }

    pub fn device_volume(&self) -> f64 {
        self.log.borrow().volume
    }
}

pub fn track(id: &str) -> Track {
    Track::new(id, format!("Song {id}"), "Artist", url(id))
}

pub fn url(id: &str) -> String {
    format!("https://cdn.example.com/{id}.mp3")
}

pub fn playlist(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}
