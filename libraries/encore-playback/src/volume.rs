//! Volume control
//!
//! Normalized output level in `[0, 1]` with a mute switch that preserves
//! the level underneath.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f64,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// Out-of-range levels are clamped; a non-finite level reads as full volume.
    pub fn new(level: f64) -> Self {
        Self {
            level: Self::sanitize(level).unwrap_or(1.0),
            muted: false,
        }
    }

    /// Set volume level
    ///
    /// Clamps into `[0, 1]`. A non-finite level is ignored. Raising the level
    /// above zero lifts mute. Returns whether anything changed.
    pub fn set_level(&mut self, level: f64) -> bool {
        let Some(level) = Self::sanitize(level) else {
            return false;
        };

        let unmute = self.muted && level > 0.0;
        let changed = self.level != level || unmute;
        self.level = level;
        if unmute {
            self.muted = false;
        }
        changed
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) -> bool {
        !std::mem::replace(&mut self.muted, true)
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) -> bool {
        std::mem::replace(&mut self.muted, false)
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level the device should output
    ///
    /// Returns 0.0 if muted, otherwise the stored level
    pub fn effective(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn sanitize(level: f64) -> Option<f64> {
        level.is_finite().then(|| level.clamp(0.0, 1.0))
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
