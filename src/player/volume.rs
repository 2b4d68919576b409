// SPDX-License-Identifier: MPL-2.0
//! Volume domain type for audio playback.
//!
//! This module provides a type-safe wrapper for volume values, ensuring they
//! are always within the valid range (0.0-1.0), and a small controller that
//! retains the last audible level so mute/unmute round-trips.

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME, VOLUME_STEP};

/// Volume level, guaranteed to be within valid range (0.0-1.0).
///
/// This newtype enforces validity at the type level, making it impossible
/// to create an invalid volume value.
///
/// # Example
///
/// ```
/// use pip_player::player::Volume;
///
/// let vol = Volume::new(0.5);
/// assert_eq!(vol.value(), 0.5);
///
/// // Values outside range are clamped
/// let too_loud = Volume::new(2.0);
/// assert_eq!(too_loud.value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively muted (below audible threshold).
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 < 0.001
    }

    /// Increases volume by one step, clamping to maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(self.0 + VOLUME_STEP)
    }

    /// Decreases volume by one step, clamping to minimum.
    #[must_use]
    pub fn decrease(self) -> Self {
        Self::new(self.0 - VOLUME_STEP)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

/// Volume state with last-audible retention for mute toggling.
///
/// Setting the level to zero mutes without forgetting the previous level;
/// [`toggle_mute`](Self::toggle_mute) restores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeControl {
    level: Volume,
    last_audible: Volume,
}

impl VolumeControl {
    /// Creates a control at the given initial level.
    ///
    /// If the initial level is muted, the last audible level falls back to
    /// the default volume so a later unmute has somewhere to return to.
    #[must_use]
    pub fn new(initial: Volume) -> Self {
        let last_audible = if initial.is_muted() {
            Volume::default()
        } else {
            initial
        };
        Self {
            level: initial,
            last_audible,
        }
    }

    /// Returns the current level.
    #[must_use]
    pub fn level(self) -> Volume {
        self.level
    }

    /// Returns the last non-zero level set.
    #[must_use]
    pub fn last_audible(self) -> Volume {
        self.last_audible
    }

    /// Sets the level, retaining it as the last audible level when non-zero.
    pub fn set(&mut self, volume: Volume) {
        if !volume.is_muted() {
            self.last_audible = volume;
        }
        self.level = volume;
    }

    /// Toggles between muted and the last audible level.
    ///
    /// Returns the new level.
    pub fn toggle_mute(&mut self) -> Volume {
        self.level = if self.level.is_muted() {
            self.last_audible
        } else {
            Volume::new(0.0)
        };
        self.level
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(Volume::default())
    }
}
