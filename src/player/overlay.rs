// SPDX-License-Identifier: MPL-2.0
//! Overlay visibility domain types.
//!
//! The control overlay floats over the video view and hides itself when the
//! pointer goes idle. This module provides the visibility states, the pointer
//! events that drive them, and a type-safe wrapper for the auto-hide delay.
//! The actual transitions live in the coordinator; the countdown itself is
//! owned by the driver (or whatever front end hosts the coordinator).

use crate::config::{
    DEFAULT_OVERLAY_TIMEOUT_SECS, MAX_OVERLAY_TIMEOUT_SECS, MIN_OVERLAY_TIMEOUT_SECS,
};

/// Visibility state of the control overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayVisibility {
    /// Overlay is invisible.
    #[default]
    Hidden,
    /// Overlay is visible with an active auto-hide countdown.
    Transient,
    /// Overlay is visible because the pointer is over the controls;
    /// the countdown is suspended.
    Locked,
}

impl OverlayVisibility {
    /// Returns true if the overlay is visible in any form.
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Returns true if an auto-hide countdown should be running.
    #[must_use]
    pub fn has_countdown(self) -> bool {
        matches!(self, Self::Transient)
    }
}

/// Pointer notifications from the hosting view.
///
/// The player region is the whole video view; the controls region is the
/// overlay itself. Entering the controls implies the pointer is still inside
/// the player region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer entered the player region outside the controls.
    EnteredPlayer,
    /// Pointer left the player region entirely.
    LeftPlayer,
    /// Pointer moved onto the control overlay.
    EnteredControls,
    /// Pointer moved off the controls but stayed inside the player region.
    LeftControls,
}

/// Auto-hide delay for the control overlay, in seconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1-30 seconds).
///
/// # Example
///
/// ```
/// use pip_player::player::OverlayTimeout;
///
/// let timeout = OverlayTimeout::new(5);
/// assert_eq!(timeout.value(), 5);
///
/// // Values outside range are clamped
/// let too_high = OverlayTimeout::new(100);
/// assert_eq!(too_high.value(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTimeout(u32);

impl OverlayTimeout {
    /// Creates a new overlay timeout value, clamping to valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(MIN_OVERLAY_TIMEOUT_SECS, MAX_OVERLAY_TIMEOUT_SECS))
    }

    /// Returns the value as u32.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the timeout as a Duration.
    #[must_use]
    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.0))
    }
}

impl Default for OverlayTimeout {
    fn default() -> Self {
        Self(DEFAULT_OVERLAY_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_valid_range() {
        assert_eq!(OverlayTimeout::new(0).value(), MIN_OVERLAY_TIMEOUT_SECS);
        assert_eq!(OverlayTimeout::new(100).value(), MAX_OVERLAY_TIMEOUT_SECS);
    }

    #[test]
    fn new_accepts_valid_values() {
        assert_eq!(OverlayTimeout::new(1).value(), 1);
        assert_eq!(OverlayTimeout::new(15).value(), 15);
        assert_eq!(OverlayTimeout::new(30).value(), 30);
    }

    #[test]
    fn default_returns_expected_value() {
        assert_eq!(
            OverlayTimeout::default().value(),
            DEFAULT_OVERLAY_TIMEOUT_SECS
        );
    }

    #[test]
    fn as_duration_converts_correctly() {
        let timeout = OverlayTimeout::new(5);
        assert_eq!(timeout.as_duration(), std::time::Duration::from_secs(5));
    }

    #[test]
    fn default_visibility_is_hidden() {
        assert_eq!(OverlayVisibility::default(), OverlayVisibility::Hidden);
    }

    #[test]
    fn visibility_checks() {
        assert!(!OverlayVisibility::Hidden.is_visible());
        assert!(OverlayVisibility::Transient.is_visible());
        assert!(OverlayVisibility::Locked.is_visible());

        assert!(OverlayVisibility::Transient.has_countdown());
        assert!(!OverlayVisibility::Locked.has_countdown());
        assert!(!OverlayVisibility::Hidden.has_countdown());
    }
}
