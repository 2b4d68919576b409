// SPDX-License-Identifier: MPL-2.0
//! Picture-in-picture port definition.
//!
//! The platform PiP subsystem works delegate-style: requesting a start or stop
//! returns immediately and the outcome arrives later as a callback. This
//! module maps that contract onto a [`PipController`] trait for the requests
//! and a [`PipEvent`] enum for the callbacks, which adapters feed back into
//! the coordinator as ordinary events.

use std::fmt;

/// Errors reported by the PiP subsystem.
#[derive(Debug, Clone)]
pub enum PipError {
    /// PiP is not available (unsupported platform, no video layer).
    Unavailable,
    /// The platform failed to start PiP.
    StartFailed(String),
    /// The platform failed to stop PiP.
    StopFailed(String),
}

impl fmt::Display for PipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipError::Unavailable => write!(f, "picture-in-picture is not available"),
            PipError::StartFailed(msg) => write!(f, "failed to start picture-in-picture: {}", msg),
            PipError::StopFailed(msg) => write!(f, "failed to stop picture-in-picture: {}", msg),
        }
    }
}

/// Asynchronous lifecycle callbacks from the PiP subsystem.
///
/// Adapters translate the platform's delegate methods into these events and
/// deliver them to the coordinator (directly or through the driver's PiP
/// event channel).
#[derive(Debug, Clone)]
pub enum PipEvent {
    /// The floating window is up; the start request completed.
    Started,
    /// The floating window is gone; the stop request completed.
    Stopped,
    /// The start request failed asynchronously.
    StartFailed(String),
    /// The stop request failed asynchronously.
    StopFailed(String),
    /// The platform asks the app to bring its main UI back before the
    /// floating window closes.
    RestoreUi,
}

/// Port for the picture-in-picture collaborator.
///
/// Requests are asynchronous: an `Ok` return only means the request was
/// accepted. The outcome arrives as a [`PipEvent`]. An `Err` return means the
/// request was rejected immediately and no event will follow.
pub trait PipController: Send {
    /// Requests the platform to start PiP.
    ///
    /// # Errors
    ///
    /// Returns a [`PipError`] if the request cannot be issued at all.
    fn request_start(&mut self) -> Result<(), PipError>;

    /// Requests the platform to stop PiP.
    ///
    /// # Errors
    ///
    /// Returns a [`PipError`] if the request cannot be issued at all.
    fn request_stop(&mut self) -> Result<(), PipError>;

    /// Releases the platform controller.
    ///
    /// Called during session teardown so no stale delegate callback can fire
    /// against the next media item. Adapters recreate the platform controller
    /// lazily on the next start request.
    fn release(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe
    fn _assert_object_safe(_: &dyn PipController) {}

    struct MockPip {
        active: bool,
        released: bool,
    }

    impl PipController for MockPip {
        fn request_start(&mut self) -> Result<(), PipError> {
            if self.released {
                return Err(PipError::Unavailable);
            }
            self.active = true;
            Ok(())
        }

        fn request_stop(&mut self) -> Result<(), PipError> {
            self.active = false;
            Ok(())
        }

        fn release(&mut self) {
            self.active = false;
            self.released = true;
        }
    }

    #[test]
    fn mock_pip_start_stop() {
        let mut pip = MockPip {
            active: false,
            released: false,
        };

        pip.request_start().unwrap();
        assert!(pip.active);

        pip.request_stop().unwrap();
        assert!(!pip.active);
    }

    #[test]
    fn released_controller_rejects_start() {
        let mut pip = MockPip {
            active: false,
            released: false,
        };
        pip.release();
        assert!(matches!(pip.request_start(), Err(PipError::Unavailable)));
    }

    #[test]
    fn pip_error_display() {
        assert!(format!("{}", PipError::Unavailable).contains("not available"));
        assert!(format!("{}", PipError::StartFailed("no layer".into())).contains("no layer"));
        assert!(format!("{}", PipError::StopFailed("timeout".into())).contains("timeout"));
    }
}
