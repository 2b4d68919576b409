// SPDX-License-Identifier: MPL-2.0
//! Playback and picture-in-picture state machines.
//!
//! - [`PlaybackState`]: what the transport is doing (idle, loading, playing,
//!   paused, error)
//! - [`PipState`]: where the floating window is in its lifecycle (normal,
//!   entering, active, exiting)
//!
//! Transitions are applied by the coordinator; these types only model the
//! states and the queries the rest of the crate needs.

/// Playback state of the bound media item.
///
/// Equality ignores the error payload: two error states compare equal
/// regardless of cause. The coordinator only ever branches on the variant;
/// the message exists for display.
#[derive(Debug, Clone, Default)]
pub enum PlaybackState {
    /// Nothing bound or nothing requested yet.
    #[default]
    Idle,
    /// A bind or a live-edge resolution is in flight, or the framework is
    /// buffering.
    Loading,
    /// The framework is actively rendering media.
    Playing,
    /// Playback is paused.
    Paused,
    /// The current operation failed. The message is opaque display text.
    Error { message: String },
}

impl PartialEq for PlaybackState {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Eq for PlaybackState {}

impl PlaybackState {
    /// Returns true if the video is currently playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if the video is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if a load or live-edge resolution is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if the player is in an error state.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the error message if in error state.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Lifecycle state of the picture-in-picture window.
///
/// `Entering` and `Exiting` are transient: they are entered only while an
/// asynchronous platform call is in flight and always resolve to `Active`
/// or `Normal` via a confirmation event, never synchronously. User toggles
/// are ignored while transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipState {
    /// Video plays inline in the main window.
    #[default]
    Normal,
    /// A start request is in flight.
    Entering,
    /// The floating window is up.
    Active,
    /// A stop request is in flight.
    Exiting,
}

impl PipState {
    /// Returns true if the floating window is up.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if an asynchronous platform call is in flight.
    ///
    /// User toggles are ignored in this state.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_playback_state_is_idle() {
        assert_eq!(PlaybackState::default(), PlaybackState::Idle);
    }

    #[test]
    fn playback_state_checks() {
        assert!(PlaybackState::Playing.is_playing());
        assert!(!PlaybackState::Paused.is_playing());

        assert!(PlaybackState::Paused.is_paused());
        assert!(PlaybackState::Loading.is_loading());

        assert!(PlaybackState::Error {
            message: "x".into()
        }
        .is_error());
        assert!(!PlaybackState::Idle.is_error());
    }

    #[test]
    fn error_equality_ignores_payload() {
        let a = PlaybackState::Error {
            message: "invalid URL".into(),
        };
        let b = PlaybackState::Error {
            message: "PiP start failed".into(),
        };
        assert_eq!(a, b);
        assert_ne!(a, PlaybackState::Paused);
    }

    #[test]
    fn error_message_is_exposed_for_display() {
        let state = PlaybackState::Error {
            message: "boom".into(),
        };
        assert_eq!(state.error_message(), Some("boom"));
        assert_eq!(PlaybackState::Playing.error_message(), None);
    }

    #[test]
    fn default_pip_state_is_normal() {
        assert_eq!(PipState::default(), PipState::Normal);
    }

    #[test]
    fn pip_transient_states() {
        assert!(PipState::Entering.is_transient());
        assert!(PipState::Exiting.is_transient());
        assert!(!PipState::Normal.is_transient());
        assert!(!PipState::Active.is_transient());

        assert!(PipState::Active.is_active());
        assert!(!PipState::Exiting.is_active());
    }
}
