// SPDX-License-Identifier: MPL-2.0
//! Media playback port definition.
//!
//! This module defines the [`MediaSession`] trait for the underlying media
//! framework. Infrastructure adapters (AVFoundation, GStreamer, ...) implement
//! this trait; the coordinator is a pure consumer.
//!
//! # Design Notes
//!
//! - The session is **stateful** - it owns the bound media item and the
//!   periodic status observation
//! - Methods are not `async` - requesting an operation returns immediately and
//!   progress is reported back through periodic [`TransportStatus`] samples
//! - A `duration()` of `None` marks a live stream of indefinite length; the
//!   live edge is the end of the seekable range

use crate::player::source::SourceUrl;
use std::fmt;
use std::time::Duration;

/// Transport status reported by the media framework's periodic observation.
///
/// Samples arrive push-style at sub-second intervals while observation is
/// running (the adapter delivers them to the coordinator directly or through
/// the driver's transport channel) and drive the coordinator's
/// [`PlaybackState`](crate::player::PlaybackState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportStatus {
    /// The framework is actively rendering media.
    Playing,
    /// The framework is waiting for data (buffering, stalled).
    Buffering,
    /// Neither playing nor waiting (paused, stopped, nothing bound).
    Idle,
    /// Playback failed inside the framework.
    Failed(String),
}

/// Errors reported synchronously by a media session adapter.
#[derive(Debug, Clone)]
pub enum MediaError {
    /// The item could not be bound to the session.
    BindFailed(String),
    /// No media item is currently bound.
    NoItem,
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::BindFailed(msg) => write!(f, "failed to bind media item: {}", msg),
            MediaError::NoItem => write!(f, "no media item bound"),
        }
    }
}

/// Port for the media playback collaborator.
///
/// # Thread Safety
///
/// Implementations must be `Send` so the session can live inside the driver
/// task. They are **not** required to be `Sync` since they maintain mutable
/// state.
///
/// # Lifecycle
///
/// 1. `load()` binds a source to the session
/// 2. `start_observation()` begins periodic status sampling
/// 3. `play()`/`pause()`/`seek()` control transport
/// 4. `stop_observation()` then `detach()` release the bound item
///
/// The coordinator always releases in the reverse order of acquisition so
/// that no observation callback can fire against a detached item.
pub trait MediaSession: Send {
    /// Binds a source to the session, replacing any previous item.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] if the item cannot be created or attached.
    fn load(&mut self, source: &SourceUrl) -> Result<(), MediaError>;

    /// Requests playback to start. Progress arrives via status samples.
    fn play(&mut self);

    /// Requests playback to pause.
    fn pause(&mut self);

    /// Seeks to `target` with the given tolerance.
    ///
    /// A generous tolerance lets the framework land on a nearby keyframe.
    fn seek(&mut self, target: Duration, tolerance: Duration);

    /// Returns the item duration, or `None` for a live stream of indefinite
    /// length.
    fn duration(&self) -> Option<Duration>;

    /// Returns the end of the seekable range (the live edge), if known.
    ///
    /// Freshly bound live streams may report `None` until the framework has
    /// loaded enough of the playlist to know its extent.
    fn seekable_end(&self) -> Option<Duration>;

    /// Starts periodic status observation.
    fn start_observation(&mut self);

    /// Stops periodic status observation.
    fn stop_observation(&mut self);

    /// Sets the playback volume (0.0 to 1.0).
    fn set_volume(&mut self, volume: f32);

    /// Detaches the bound media item, releasing framework resources.
    fn detach(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe
    fn _assert_object_safe(_: &dyn MediaSession) {}

    // Mock implementation for testing
    struct MockSession {
        bound: Option<SourceUrl>,
        observing: bool,
        playing: bool,
        position: Duration,
        volume: f32,
    }

    impl MockSession {
        fn new() -> Self {
            Self {
                bound: None,
                observing: false,
                playing: false,
                position: Duration::ZERO,
                volume: 1.0,
            }
        }
    }

    impl MediaSession for MockSession {
        fn load(&mut self, source: &SourceUrl) -> Result<(), MediaError> {
            self.bound = Some(source.clone());
            self.position = Duration::ZERO;
            Ok(())
        }

        fn play(&mut self) {
            self.playing = self.bound.is_some();
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn seek(&mut self, target: Duration, _tolerance: Duration) {
            self.position = target;
        }

        fn duration(&self) -> Option<Duration> {
            self.bound.as_ref().map(|_| Duration::from_secs(120))
        }

        fn seekable_end(&self) -> Option<Duration> {
            self.duration()
        }

        fn start_observation(&mut self) {
            self.observing = true;
        }

        fn stop_observation(&mut self) {
            self.observing = false;
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn detach(&mut self) {
            self.playing = false;
            self.bound = None;
        }
    }

    #[test]
    fn mock_session_lifecycle() {
        let mut session = MockSession::new();
        let source = SourceUrl::parse("https://example.com/video.mp4").unwrap();

        // Bind
        session.load(&source).unwrap();
        session.start_observation();
        assert!(session.observing);

        // Transport
        session.play();
        assert!(session.playing);
        session.seek(Duration::from_secs(30), Duration::from_millis(500));
        assert_eq!(session.position, Duration::from_secs(30));
        session.pause();
        assert!(!session.playing);

        // Release
        session.stop_observation();
        session.detach();
        assert!(session.bound.is_none());
        assert!(!session.playing);
    }

    #[test]
    fn play_without_item_stays_idle() {
        let mut session = MockSession::new();
        session.play();
        assert!(!session.playing);
    }

    #[test]
    fn transport_status_failed_carries_its_reason() {
        let status = TransportStatus::Failed("decoder died".to_string());
        assert!(matches!(status, TransportStatus::Failed(ref msg) if msg == "decoder died"));
    }

    #[test]
    fn media_error_display() {
        let err = MediaError::BindFailed("unreachable host".to_string());
        assert!(format!("{}", err).contains("unreachable host"));
        assert_eq!(format!("{}", MediaError::NoItem), "no media item bound");
    }
}
