//! Composition point
//!
//! The session scope constructs one controller and installs it here;
//! consumers take a shared handle instead of reaching for a global.

use crate::controller::PlaybackController;
use crate::device::MediaDevice;
use crate::error::{PlaybackError, Result};
use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

/// Shared reference to the session's controller
pub type SharedController<D> = Rc<RefCell<PlaybackController<D>>>;

/// Holder for the one controller of a session
///
/// Handing out a handle before [`install`](Self::install) fails fast with
/// [`PlaybackError::NotInstalled`].
pub struct ControllerSlot<D: MediaDevice> {
    inner: OnceCell<SharedController<D>>,
}

impl<D: MediaDevice> ControllerSlot<D> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            inner: OnceCell::new(),
        }
    }

    /// Install the session's controller
    ///
    /// # Errors
    /// Returns `AlreadyInstalled` if a controller is already present
    pub fn install(&self, controller: PlaybackController<D>) -> Result<SharedController<D>> {
        let shared = Rc::new(RefCell::new(controller));
        self.inner
            .set(Rc::clone(&shared))
            .map_err(|_| PlaybackError::AlreadyInstalled)?;
        Ok(shared)
    }

    /// Handle to the installed controller
    ///
    /// # Errors
    /// Returns `NotInstalled` if called before `install`
    pub fn handle(&self) -> Result<SharedController<D>> {
        self.inner.get().cloned().ok_or(PlaybackError::NotInstalled)
    }

    /// Whether a controller has been installed
    pub fn is_installed(&self) -> bool {
        self.inner.get().is_some()
    }
}

impl<D: MediaDevice> Default for ControllerSlot<D> {
    fn default() -> Self {
        Self::new()
    }
}
