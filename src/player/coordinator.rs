// SPDX-License-Identifier: MPL-2.0
//! Player/PiP/overlay state coordinator.
//!
//! [`PlaybackCoordinator`] owns the three state machines of the player view:
//! transport ([`PlaybackState`]), picture-in-picture ([`PipState`]) and the
//! control overlay ([`OverlayVisibility`]). It receives externally delivered
//! events (status samples, PiP lifecycle callbacks, pointer notifications,
//! timer firings, user commands), applies the transitions, drives the media
//! session and PiP controller through their ports, and returns [`Effect`]s
//! for the hosting front end.
//!
//! All entry points are synchronous and expected to run on one execution
//! context; the bundled driver serializes them on a single tokio task.

use crate::config::{
    Settings, LIVE_EDGE_POLL_DELAY_MS, LIVE_SEEK_TOLERANCE_MS, MAX_LIVE_EDGE_ATTEMPTS,
    PIP_STOP_GRACE_MS,
};
use crate::player::effect::Effect;
use crate::player::overlay::{OverlayTimeout, OverlayVisibility, PointerEvent};
use crate::player::source::SourceUrl;
use crate::player::state::{PipState, PlaybackState};
use crate::player::volume::{Volume, VolumeControl};
use crate::port::media::{MediaSession, TransportStatus};
use crate::port::pip::{PipController, PipEvent};
use std::time::Duration;

/// Read-only view of the coordinator state for front-end adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub playback: PlaybackState,
    pub pip: PipState,
    pub overlay: OverlayVisibility,
    pub volume: f32,
    pub overlay_timeout_secs: u32,
    pub source: Option<String>,
    pub title: Option<String>,
}

/// Coordinates playback, picture-in-picture and overlay visibility for one
/// player view.
///
/// Constructed explicitly and owned by whoever hosts it; there is no shared
/// global instance.
pub struct PlaybackCoordinator<M: MediaSession, P: PipController> {
    session: M,
    pip: P,

    playback: PlaybackState,
    pip_state: PipState,
    overlay: OverlayVisibility,

    volume: VolumeControl,
    overlay_timeout: OverlayTimeout,

    current_source: Option<SourceUrl>,
    /// Source switch parked while a PiP stop confirmation is awaited.
    /// A superseding switch replaces it; the stale continuation never runs.
    pending_source: Option<SourceUrl>,
    live_edge_attempts: u8,
    title_override: Option<String>,
}

impl<M: MediaSession, P: PipController> PlaybackCoordinator<M, P> {
    /// Creates a coordinator over the given ports, seeded from settings.
    pub fn new(session: M, pip: P, settings: &Settings) -> Self {
        let volume = Volume::new(settings.volume.unwrap_or_else(|| Volume::default().value()));
        let overlay_timeout = settings
            .overlay_timeout_secs
            .map(OverlayTimeout::new)
            .unwrap_or_default();

        let mut session = session;
        session.set_volume(volume.value());

        Self {
            session,
            pip,
            playback: PlaybackState::Idle,
            pip_state: PipState::Normal,
            overlay: OverlayVisibility::Hidden,
            volume: VolumeControl::new(volume),
            overlay_timeout,
            current_source: None,
            pending_source: None,
            live_edge_attempts: 0,
            title_override: None,
        }
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    /// Returns the current playback state.
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    /// Returns the current PiP state.
    pub fn pip_state(&self) -> PipState {
        self.pip_state
    }

    /// Returns the current overlay visibility.
    pub fn overlay(&self) -> OverlayVisibility {
        self.overlay
    }

    /// Returns the current volume level.
    pub fn volume(&self) -> Volume {
        self.volume.level()
    }

    /// Returns the configured auto-hide delay.
    pub fn overlay_timeout(&self) -> OverlayTimeout {
        self.overlay_timeout
    }

    /// Returns the currently bound source, if any.
    pub fn current_source(&self) -> Option<&SourceUrl> {
        self.current_source.as_ref()
    }

    /// Returns the title to display: the user override if set, otherwise the
    /// bound source URL.
    pub fn display_title(&self) -> Option<String> {
        self.title_override
            .clone()
            .or_else(|| self.current_source.as_ref().map(|s| s.as_str().to_string()))
    }

    /// Returns a snapshot of the full coordinator state.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            playback: self.playback.clone(),
            pip: self.pip_state,
            overlay: self.overlay,
            volume: self.volume.level().value(),
            overlay_timeout_secs: self.overlay_timeout.value(),
            source: self.current_source.as_ref().map(|s| s.as_str().to_string()),
            title: self.display_title(),
        }
    }

    fn settings(&self) -> Settings {
        Settings {
            volume: Some(self.volume.level().value()),
            overlay_timeout_secs: Some(self.overlay_timeout.value()),
            last_source: self.current_source.as_ref().map(|s| s.as_str().to_string()),
        }
    }

    // =====================================================================
    // User commands
    // =====================================================================

    /// Starts or resumes playback.
    ///
    /// State transitions:
    /// - Idle/Paused with a bound source: for a live stream, seek to the live
    ///   edge first (resolving it with a bounded poll if not yet known), then
    ///   play; for a finite item, play immediately without any seek
    /// - Error: attempt recovery by rebinding the current source into a
    ///   fresh session
    /// - Playing/Loading: no-op
    pub fn play(&mut self) -> Vec<Effect> {
        match self.playback {
            PlaybackState::Idle | PlaybackState::Paused => {
                if self.current_source.is_none() {
                    return Vec::new();
                }
                self.start_playback()
            }
            PlaybackState::Error { .. } => match self.current_source.clone() {
                Some(source) => self.rebind(source),
                None => Vec::new(),
            },
            PlaybackState::Playing | PlaybackState::Loading => Vec::new(),
        }
    }

    /// Pauses playback.
    ///
    /// Only a playing transport transitions; everything else is a no-op.
    pub fn pause(&mut self) -> Vec<Effect> {
        if self.playback.is_playing() {
            self.session.pause();
            self.playback = PlaybackState::Paused;
        }
        Vec::new()
    }

    /// Toggles picture-in-picture.
    ///
    /// Toggles while a start or stop is already in flight are ignored. An
    /// immediately rejected request surfaces as a playback error without
    /// leaving the current PiP state.
    pub fn toggle_pip(&mut self) -> Vec<Effect> {
        match self.pip_state {
            PipState::Normal => match self.pip.request_start() {
                Ok(()) => {
                    self.pip_state = PipState::Entering;
                }
                Err(err) => {
                    self.playback = PlaybackState::Error {
                        message: err.to_string(),
                    };
                }
            },
            PipState::Active => match self.pip.request_stop() {
                Ok(()) => {
                    self.pip_state = PipState::Exiting;
                }
                Err(err) => {
                    self.playback = PlaybackState::Error {
                        message: err.to_string(),
                    };
                }
            },
            PipState::Entering | PipState::Exiting => {
                log::debug!("PiP toggle ignored while {:?}", self.pip_state);
            }
        }
        Vec::new()
    }

    /// Sets the playback volume, retaining non-zero levels for mute restore.
    pub fn set_volume(&mut self, value: f32) -> Vec<Effect> {
        self.apply_volume(Volume::new(value))
    }

    /// Raises the volume by one step.
    pub fn volume_up(&mut self) -> Vec<Effect> {
        self.apply_volume(self.volume.level().increase())
    }

    /// Lowers the volume by one step, muting at the floor.
    pub fn volume_down(&mut self) -> Vec<Effect> {
        self.apply_volume(self.volume.level().decrease())
    }

    fn apply_volume(&mut self, volume: Volume) -> Vec<Effect> {
        self.volume.set(volume);
        self.session.set_volume(volume.value());
        vec![Effect::PersistSettings(self.settings())]
    }

    /// Toggles between muted and the last audible volume.
    pub fn toggle_mute(&mut self) -> Vec<Effect> {
        let volume = self.volume.toggle_mute();
        self.session.set_volume(volume.value());
        vec![Effect::PersistSettings(self.settings())]
    }

    /// Changes the overlay auto-hide delay.
    ///
    /// A running countdown is re-armed with the new delay.
    pub fn set_overlay_timeout(&mut self, secs: u32) -> Vec<Effect> {
        self.overlay_timeout = OverlayTimeout::new(secs);
        let mut effects = Vec::new();
        if self.overlay.has_countdown() {
            effects.push(Effect::CancelOverlayHide);
            effects.push(Effect::ScheduleOverlayHide(self.overlay_timeout));
        }
        effects.push(Effect::PersistSettings(self.settings()));
        effects
    }

    /// Sets or clears the display-title override.
    pub fn set_title_override(&mut self, title: Option<String>) -> Vec<Effect> {
        self.title_override = title.filter(|t| !t.trim().is_empty());
        Vec::new()
    }

    /// Switches to a new video source.
    ///
    /// A malformed URL fails fast: the playback state becomes an error and
    /// nothing else is touched. A valid URL runs the switch protocol: exit
    /// PiP first if it is active, park behind any in-flight PiP transition
    /// (waiting for the confirmation or a bounded grace), then tear the old
    /// session down release-before-acquire, bind the new source and start
    /// playback.
    pub fn switch_source(&mut self, input: &str) -> Vec<Effect> {
        let source = match SourceUrl::parse(input) {
            Ok(source) => source,
            Err(err) => {
                self.playback = PlaybackState::Error {
                    message: err.to_string(),
                };
                return Vec::new();
            }
        };

        self.playback = PlaybackState::Loading;

        match self.pip_state {
            PipState::Active => match self.pip.request_stop() {
                Ok(()) => {
                    self.pip_state = PipState::Exiting;
                    self.pending_source = Some(source);
                    vec![Effect::SchedulePipStopGrace(Duration::from_millis(
                        PIP_STOP_GRACE_MS,
                    ))]
                }
                Err(err) => {
                    self.playback = PlaybackState::Error {
                        message: err.to_string(),
                    };
                    Vec::new()
                }
            },
            PipState::Entering | PipState::Exiting => {
                // A transition is in flight; the switch parks until the
                // confirmation handler (or the grace deadline) completes it.
                // A superseding switch replaces the parked source, and the
                // grace already on its way covers it; the earlier switch
                // never runs.
                let superseded = self.pending_source.replace(source).is_some();
                if superseded {
                    Vec::new()
                } else {
                    vec![Effect::SchedulePipStopGrace(Duration::from_millis(
                        PIP_STOP_GRACE_MS,
                    ))]
                }
            }
            PipState::Normal => self.rebind(source),
        }
    }

    // =====================================================================
    // Inbound events
    // =====================================================================

    /// Applies a periodic transport status sample.
    ///
    /// Samples always win over whatever the coordinator believed, with one
    /// exception: an existing error state is preserved when the framework
    /// merely reports "not playing".
    pub fn on_status_sample(&mut self, status: TransportStatus) -> Vec<Effect> {
        match status {
            TransportStatus::Playing => {
                self.playback = PlaybackState::Playing;
            }
            TransportStatus::Buffering => {
                self.playback = PlaybackState::Loading;
            }
            TransportStatus::Idle => {
                if !self.playback.is_error() {
                    self.playback = PlaybackState::Paused;
                }
            }
            TransportStatus::Failed(message) => {
                self.playback = PlaybackState::Error { message };
            }
        }
        Vec::new()
    }

    /// Applies a PiP lifecycle callback.
    pub fn on_pip_event(&mut self, event: PipEvent) -> Vec<Effect> {
        match event {
            PipEvent::Started => {
                if self.pip_state != PipState::Entering {
                    log::warn!("unexpected PiP start confirmation in {:?}", self.pip_state);
                    return Vec::new();
                }
                self.pip_state = PipState::Active;
                // A switch parked during the entry turns straight around and
                // exits again; the grace armed when it parked still covers
                // the stop.
                if self.pending_source.is_some() {
                    match self.pip.request_stop() {
                        Ok(()) => {
                            self.pip_state = PipState::Exiting;
                        }
                        Err(err) => {
                            self.pending_source = None;
                            self.playback = PlaybackState::Error {
                                message: err.to_string(),
                            };
                        }
                    }
                }
                Vec::new()
            }
            PipEvent::StartFailed(message) => {
                self.pip_state = PipState::Normal;
                if let Some(source) = self.pending_source.take() {
                    log::warn!("PiP start failed mid-switch, proceeding: {message}");
                    return self.rebind(source);
                }
                self.playback = PlaybackState::Error { message };
                Vec::new()
            }
            PipEvent::Stopped => {
                if self.pip_state != PipState::Exiting {
                    // Late confirmation after the stop grace already ran.
                    return Vec::new();
                }
                self.pip_state = PipState::Normal;
                let mut effects = vec![Effect::RestoreMainWindow];
                if let Some(source) = self.pending_source.take() {
                    effects.extend(self.rebind(source));
                }
                effects
            }
            PipEvent::StopFailed(message) => {
                // The floating window is presumably still up; resolve back
                // to the prior state and abandon any parked switch.
                if self.pip_state == PipState::Exiting {
                    self.pip_state = PipState::Active;
                }
                if self.pending_source.take().is_some() {
                    log::warn!("abandoning pending source switch after PiP stop failure");
                }
                self.playback = PlaybackState::Error { message };
                Vec::new()
            }
            PipEvent::RestoreUi => vec![Effect::RestoreMainWindow],
        }
    }

    /// Applies a pointer notification to the overlay machine.
    ///
    /// Any running countdown is invalidated before the transition and armed
    /// again only when the overlay enters or remains in the transient state.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Vec<Effect> {
        use OverlayVisibility::{Hidden, Locked, Transient};
        use PointerEvent::{EnteredControls, EnteredPlayer, LeftControls, LeftPlayer};

        match (self.overlay, event) {
            (Hidden, EnteredPlayer) => {
                self.overlay = Transient;
                vec![
                    Effect::CancelOverlayHide,
                    Effect::AnimateOverlayShow,
                    Effect::ScheduleOverlayHide(self.overlay_timeout),
                ]
            }
            (Hidden, EnteredControls) => {
                self.overlay = Locked;
                vec![Effect::CancelOverlayHide, Effect::AnimateOverlayShow]
            }
            (Transient, EnteredControls) => {
                self.overlay = Locked;
                vec![Effect::CancelOverlayHide]
            }
            (Locked, EnteredControls) => vec![Effect::CancelOverlayHide],
            (Locked, LeftControls | EnteredPlayer) => {
                self.overlay = Transient;
                vec![
                    Effect::CancelOverlayHide,
                    Effect::ScheduleOverlayHide(self.overlay_timeout),
                ]
            }
            // Re-entry while transient restarts the countdown without a
            // second show animation.
            (Transient, EnteredPlayer | LeftControls) => vec![
                Effect::CancelOverlayHide,
                Effect::ScheduleOverlayHide(self.overlay_timeout),
            ],
            (Transient | Locked, LeftPlayer) => {
                self.overlay = Hidden;
                vec![Effect::CancelOverlayHide, Effect::AnimateOverlayHide]
            }
            (Hidden, LeftPlayer | LeftControls) => Vec::new(),
        }
    }

    /// Fires when the auto-hide countdown elapses.
    pub fn on_auto_hide_elapsed(&mut self) -> Vec<Effect> {
        if self.overlay.has_countdown() {
            self.overlay = OverlayVisibility::Hidden;
            vec![Effect::AnimateOverlayHide]
        } else {
            Vec::new()
        }
    }

    /// Fires when a scheduled live-edge poll elapses.
    ///
    /// Only meaningful while the transport is still loading towards a live
    /// start; anything else (user paused, a switch superseded the play, an
    /// error surfaced) makes the poll a stale continuation that must not run.
    pub fn on_live_edge_poll(&mut self) -> Vec<Effect> {
        if !self.playback.is_loading() || self.pending_source.is_some() {
            return Vec::new();
        }

        self.live_edge_attempts += 1;
        if let Some(edge) = self.session.seekable_end() {
            self.session
                .seek(edge, Duration::from_millis(LIVE_SEEK_TOLERANCE_MS));
            self.session.play();
            self.playback = PlaybackState::Playing;
            Vec::new()
        } else if self.live_edge_attempts >= MAX_LIVE_EDGE_ATTEMPTS {
            log::warn!(
                "live edge unresolved after {} attempts, playing from current position",
                self.live_edge_attempts
            );
            self.session.play();
            self.playback = PlaybackState::Playing;
            Vec::new()
        } else {
            vec![Effect::ScheduleLiveEdgePoll(Duration::from_millis(
                LIVE_EDGE_POLL_DELAY_MS,
            ))]
        }
    }

    /// Fires when the bounded wait for a PiP stop confirmation elapses.
    ///
    /// If the confirmation never arrived, the parked source switch proceeds
    /// anyway; a confirmation arriving later is ignored.
    pub fn on_pip_stop_timeout(&mut self) -> Vec<Effect> {
        if !self.pip_state.is_transient() {
            return Vec::new();
        }
        let Some(source) = self.pending_source.take() else {
            return Vec::new();
        };
        log::warn!("PiP stop confirmation not received in time, proceeding with source switch");
        self.pip_state = PipState::Normal;
        // The floating window may still be up; the main window comes back
        // regardless so the new item has somewhere to render.
        let mut effects = vec![Effect::RestoreMainWindow];
        effects.extend(self.rebind(source));
        effects
    }

    // =====================================================================
    // Internals
    // =====================================================================

    /// Starts playback of the bound item, seeking a live stream to its edge
    /// first.
    fn start_playback(&mut self) -> Vec<Effect> {
        if self.session.duration().is_some() {
            // Finite item: play immediately, no seek.
            self.session.play();
            self.playback = PlaybackState::Playing;
            return Vec::new();
        }

        if let Some(edge) = self.session.seekable_end() {
            self.session
                .seek(edge, Duration::from_millis(LIVE_SEEK_TOLERANCE_MS));
            self.session.play();
            self.playback = PlaybackState::Playing;
            Vec::new()
        } else {
            // Live stream whose extent is not known yet: resolve the edge
            // with a bounded poll before issuing play.
            self.playback = PlaybackState::Loading;
            self.live_edge_attempts = 0;
            vec![Effect::ScheduleLiveEdgePoll(Duration::from_millis(
                LIVE_EDGE_POLL_DELAY_MS,
            ))]
        }
    }

    /// Tears down the current session and binds `source`.
    ///
    /// Release order matters: observation stops and the PiP controller is
    /// released before the item is paused and detached, so no callback can
    /// fire against a stale session while the new one is constructed.
    fn rebind(&mut self, source: SourceUrl) -> Vec<Effect> {
        self.session.stop_observation();
        self.pip.release();
        self.session.pause();
        self.session.detach();
        self.pip_state = PipState::Normal;
        self.pending_source = None;

        if let Err(err) = self.session.load(&source) {
            self.current_source = None;
            self.playback = PlaybackState::Error {
                message: err.to_string(),
            };
            return Vec::new();
        }

        self.session.start_observation();
        self.session.set_volume(self.volume.level().value());
        self.current_source = Some(source);

        let mut effects = self.start_playback();
        effects.push(Effect::PersistSettings(self.settings()));
        effects
    }
}
