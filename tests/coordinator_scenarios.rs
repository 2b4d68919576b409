// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios over the public coordinator API with recording ports.

use pip_player::config::Settings;
use pip_player::player::{
    Effect, OverlayVisibility, PipState, PlaybackCoordinator, PlaybackState, PointerEvent,
};
use pip_player::port::{
    MediaError, MediaSession, PipController, PipError, PipEvent, TransportStatus,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Load(String),
    Play,
    Pause,
    Seek(u64),
    StartObservation,
    StopObservation,
    Detach,
    PipStart,
    PipStop,
    PipRelease,
}

type CallLog = Arc<Mutex<Vec<Call>>>;

/// Media session that records calls and exposes its live edge through a
/// shared handle, so tests can make the edge appear between polls.
struct RecordingSession {
    calls: CallLog,
    duration: Option<Duration>,
    seekable_end: Arc<Mutex<Option<Duration>>>,
}

impl MediaSession for RecordingSession {
    fn load(&mut self, source: &pip_player::player::SourceUrl) -> Result<(), MediaError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Load(source.as_str().to_string()));
        Ok(())
    }

    fn play(&mut self) {
        self.calls.lock().unwrap().push(Call::Play);
    }

    fn pause(&mut self) {
        self.calls.lock().unwrap().push(Call::Pause);
    }

    fn seek(&mut self, target: Duration, _tolerance: Duration) {
        self.calls.lock().unwrap().push(Call::Seek(target.as_secs()));
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn seekable_end(&self) -> Option<Duration> {
        *self.seekable_end.lock().unwrap()
    }

    fn start_observation(&mut self) {
        self.calls.lock().unwrap().push(Call::StartObservation);
    }

    fn stop_observation(&mut self) {
        self.calls.lock().unwrap().push(Call::StopObservation);
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn detach(&mut self) {
        self.calls.lock().unwrap().push(Call::Detach);
    }
}

struct RecordingPip {
    calls: CallLog,
}

impl PipController for RecordingPip {
    fn request_start(&mut self) -> Result<(), PipError> {
        self.calls.lock().unwrap().push(Call::PipStart);
        Ok(())
    }

    fn request_stop(&mut self) -> Result<(), PipError> {
        self.calls.lock().unwrap().push(Call::PipStop);
        Ok(())
    }

    fn release(&mut self) {
        self.calls.lock().unwrap().push(Call::PipRelease);
    }
}

struct Harness {
    coordinator: PlaybackCoordinator<RecordingSession, RecordingPip>,
    calls: CallLog,
    edge: Arc<Mutex<Option<Duration>>>,
}

fn harness(duration: Option<Duration>, edge: Option<Duration>) -> Harness {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let edge = Arc::new(Mutex::new(edge));
    let session = RecordingSession {
        calls: Arc::clone(&calls),
        duration,
        seekable_end: Arc::clone(&edge),
    };
    let pip = RecordingPip {
        calls: Arc::clone(&calls),
    };
    Harness {
        coordinator: PlaybackCoordinator::new(session, pip, &Settings::default()),
        calls,
        edge,
    }
}

fn finite() -> Harness {
    harness(Some(Duration::from_secs(300)), Some(Duration::from_secs(300)))
}

fn position(log: &[Call], call: &Call) -> usize {
    log.iter()
        .position(|c| c == call)
        .unwrap_or_else(|| panic!("{call:?} not found in {log:?}"))
}

#[test]
fn fresh_player_is_idle_windowed_and_bare() {
    let h = finite();

    assert_eq!(h.coordinator.playback(), &PlaybackState::Idle);
    assert_eq!(h.coordinator.pip_state(), PipState::Normal);
    assert_eq!(h.coordinator.overlay(), OverlayVisibility::Hidden);
    assert!(h.coordinator.current_source().is_none());
}

#[test]
fn finite_source_plays_without_any_seek() {
    let mut h = finite();

    h.coordinator.switch_source("https://example.com/a.mp4");

    assert!(h.coordinator.playback().is_playing());
    let log = h.calls.lock().unwrap();
    assert!(!log.iter().any(|c| matches!(c, Call::Seek(_))));
}

#[test]
fn live_source_seeks_to_edge_before_playing() {
    let mut h = harness(None, Some(Duration::from_secs(1800)));

    h.coordinator.switch_source("https://example.com/live.m3u8");

    let log = h.calls.lock().unwrap();
    assert!(position(&log, &Call::Seek(1800)) < position(&log, &Call::Play));
}

#[test]
fn unknown_live_edge_resolves_across_polls() {
    let mut h = harness(None, None);
    h.coordinator.switch_source("https://example.com/live.m3u8");
    assert!(h.coordinator.playback().is_loading());

    // First poll: still no edge, the coordinator re-arms.
    let effects = h.coordinator.on_live_edge_poll();
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::ScheduleLiveEdgePoll(_))));

    // The playlist extent becomes known before the next poll.
    *h.edge.lock().unwrap() = Some(Duration::from_secs(42));
    h.coordinator.on_live_edge_poll();

    assert!(h.coordinator.playback().is_playing());
    let log = h.calls.lock().unwrap();
    assert!(position(&log, &Call::Seek(42)) < position(&log, &Call::Play));
}

#[test]
fn switching_while_in_pip_exits_before_the_new_item_plays() {
    let mut h = finite();
    h.coordinator.switch_source("https://example.com/a.mp4");
    h.coordinator.toggle_pip();
    h.coordinator.on_pip_event(PipEvent::Started);
    assert_eq!(h.coordinator.pip_state(), PipState::Active);

    h.coordinator.switch_source("https://example.com/b.mp4");
    h.coordinator.on_pip_event(PipEvent::Stopped);

    assert_eq!(h.coordinator.pip_state(), PipState::Normal);
    assert!(h.coordinator.playback().is_playing());
    let log = h.calls.lock().unwrap();
    let stop = position(&log, &Call::PipStop);
    let load = position(&log, &Call::Load("https://example.com/b.mp4".into()));
    let play = log.iter().rposition(|c| *c == Call::Play).unwrap();
    assert!(stop < load && load < play, "PiP must exit before the bind");
}

#[test]
fn switch_during_pip_entry_waits_for_the_transition() {
    let mut h = finite();
    h.coordinator.switch_source("https://example.com/a.mp4");
    h.coordinator.toggle_pip();
    h.calls.lock().unwrap().clear();

    // The entry has not confirmed yet; the switch must not tear anything
    // down while the platform request is in flight.
    h.coordinator.switch_source("https://example.com/b.mp4");
    assert_eq!(h.coordinator.pip_state(), PipState::Entering);
    assert!(h.calls.lock().unwrap().is_empty());

    // Confirmation turns the entry around into an exit, and the stop
    // confirmation completes the switch.
    h.coordinator.on_pip_event(PipEvent::Started);
    h.coordinator.on_pip_event(PipEvent::Stopped);

    assert_eq!(h.coordinator.pip_state(), PipState::Normal);
    let log = h.calls.lock().unwrap();
    let stop = position(&log, &Call::PipStop);
    let load = position(&log, &Call::Load("https://example.com/b.mp4".into()));
    assert!(stop < load);
}

#[test]
fn teardown_releases_resources_before_binding() {
    let mut h = finite();
    h.coordinator.switch_source("https://example.com/a.mp4");
    h.calls.lock().unwrap().clear();

    h.coordinator.switch_source("https://example.com/b.mp4");

    let log = h.calls.lock().unwrap();
    let steps = [
        position(&log, &Call::StopObservation),
        position(&log, &Call::PipRelease),
        position(&log, &Call::Pause),
        position(&log, &Call::Detach),
        position(&log, &Call::Load("https://example.com/b.mp4".into())),
        position(&log, &Call::StartObservation),
    ];
    assert!(steps.windows(2).all(|w| w[0] < w[1]), "order was {log:?}");
}

#[test]
fn malformed_url_leaves_everything_but_the_error_untouched() {
    let mut h = finite();
    h.coordinator.switch_source("https://example.com/a.mp4");
    h.coordinator.toggle_pip();
    h.coordinator.on_pip_event(PipEvent::Started);
    h.calls.lock().unwrap().clear();

    h.coordinator.switch_source("file://");

    assert!(h.coordinator.playback().is_error());
    assert_eq!(h.coordinator.pip_state(), PipState::Active);
    assert_eq!(
        h.coordinator.current_source().map(|s| s.as_str()),
        Some("https://example.com/a.mp4")
    );
    assert!(h.calls.lock().unwrap().is_empty());
}

#[test]
fn mute_round_trip_restores_last_audible_level() {
    let mut h = finite();
    h.coordinator.switch_source("https://example.com/a.mp4");

    h.coordinator.set_volume(0.6);
    h.coordinator.toggle_mute();
    assert!(h.coordinator.volume().is_muted());

    h.coordinator.toggle_mute();
    assert_eq!(h.coordinator.volume().value(), 0.6);
}

#[test]
fn playback_errors_compare_by_kind_not_payload() {
    let a = PlaybackState::Error {
        message: "decoder died".to_string(),
    };
    let b = PlaybackState::Error {
        message: "network unreachable".to_string(),
    };

    assert_eq!(a, b);
    assert_ne!(a, PlaybackState::Playing);
}

#[test]
fn overlay_pinned_over_controls_survives_timer_firing() {
    let mut h = finite();
    h.coordinator.on_pointer(PointerEvent::EnteredPlayer);
    h.coordinator.on_pointer(PointerEvent::EnteredControls);

    h.coordinator.on_auto_hide_elapsed();

    assert_eq!(h.coordinator.overlay(), OverlayVisibility::Locked);
}

#[test]
fn recovery_from_error_reuses_the_bound_source() {
    let mut h = finite();
    h.coordinator.switch_source("https://example.com/a.mp4");
    h.coordinator
        .on_status_sample(TransportStatus::Failed("decoder died".into()));
    h.calls.lock().unwrap().clear();

    h.coordinator.play();

    assert!(h.coordinator.playback().is_playing());
    let log = h.calls.lock().unwrap();
    assert!(log.contains(&Call::Load("https://example.com/a.mp4".into())));
}
