// SPDX-License-Identifier: MPL-2.0
//! Single-task event loop around [`PlaybackCoordinator`].
//!
//! All coordinator entry points run on one tokio task, so no transition ever
//! observes another transition mid-flight. Front ends talk to the loop
//! through a [`PlayerHandle`] and listen on the returned [`UiEvent`] channel;
//! the loop owns the timers behind the coordinator's schedule/cancel effects.

use crate::config::{self, Settings};
use crate::player::coordinator::{PlaybackCoordinator, PlayerSnapshot};
use crate::player::effect::Effect;
use crate::player::overlay::PointerEvent;
use crate::port::media::{MediaSession, TransportStatus};
use crate::port::pip::{PipController, PipEvent};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Commands a front end can send to the player loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    TogglePip,
    SetVolume(f32),
    VolumeUp,
    VolumeDown,
    ToggleMute,
    SwitchSource(String),
    Pointer(PointerEvent),
    SetOverlayTimeout(u32),
    SetTitleOverride(Option<String>),
}

/// Notifications the loop emits for the front end to render.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The coordinator state changed; redraw from this snapshot.
    StateChanged(PlayerSnapshot),
    AnimateOverlayShow,
    AnimateOverlayHide,
    RestoreMainWindow,
}

/// Cloneable handle for sending commands into the player loop.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl PlayerHandle {
    /// Sends a command to the loop.
    ///
    /// Fails only when the loop has already shut down.
    pub fn send(&self, command: PlayerCommand) -> Result<(), String> {
        self.tx
            .send(command)
            .map_err(|_| "player loop not running".to_string())
    }
}

/// Spawns the player loop over the given coordinator.
///
/// `pip_events` carries platform PiP callbacks into the loop, and
/// `transport_events` the media framework's periodic status samples. When
/// `settings_path` is `None`, persisted settings go to the platform config
/// directory.
pub fn spawn<M, P>(
    coordinator: PlaybackCoordinator<M, P>,
    pip_events: mpsc::UnboundedReceiver<PipEvent>,
    transport_events: mpsc::UnboundedReceiver<TransportStatus>,
    settings_path: Option<PathBuf>,
) -> (PlayerHandle, mpsc::UnboundedReceiver<UiEvent>, JoinHandle<()>)
where
    M: MediaSession + 'static,
    P: PipController + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(run_loop(
        coordinator,
        cmd_rx,
        pip_events,
        transport_events,
        ui_tx,
        settings_path,
    ));

    (PlayerHandle { tx: cmd_tx }, ui_rx, handle)
}

async fn run_loop<M, P>(
    mut coordinator: PlaybackCoordinator<M, P>,
    mut cmd_rx: mpsc::UnboundedReceiver<PlayerCommand>,
    mut pip_rx: mpsc::UnboundedReceiver<PipEvent>,
    mut transport_rx: mpsc::UnboundedReceiver<TransportStatus>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    settings_path: Option<PathBuf>,
) where
    M: MediaSession,
    P: PipController,
{
    let mut hide_deadline: Option<Instant> = None;
    let mut poll_deadline: Option<Instant> = None;
    let mut grace_deadline: Option<Instant> = None;
    let mut pip_open = true;
    let mut transport_open = true;

    log::debug!("player loop started");

    loop {
        let effects = tokio::select! {
            command = cmd_rx.recv() => match command {
                Some(command) => apply_command(&mut coordinator, command),
                None => break,
            },
            event = pip_rx.recv(), if pip_open => match event {
                Some(event) => coordinator.on_pip_event(event),
                None => {
                    pip_open = false;
                    continue;
                }
            },
            status = transport_rx.recv(), if transport_open => match status {
                Some(status) => coordinator.on_status_sample(status),
                None => {
                    transport_open = false;
                    continue;
                }
            },
            () = sleep_until_opt(hide_deadline), if hide_deadline.is_some() => {
                hide_deadline = None;
                coordinator.on_auto_hide_elapsed()
            }
            () = sleep_until_opt(poll_deadline), if poll_deadline.is_some() => {
                poll_deadline = None;
                coordinator.on_live_edge_poll()
            }
            () = sleep_until_opt(grace_deadline), if grace_deadline.is_some() => {
                grace_deadline = None;
                coordinator.on_pip_stop_timeout()
            }
        };

        for effect in effects {
            match effect {
                Effect::AnimateOverlayShow => forward(&ui_tx, UiEvent::AnimateOverlayShow),
                Effect::AnimateOverlayHide => forward(&ui_tx, UiEvent::AnimateOverlayHide),
                Effect::ScheduleOverlayHide(timeout) => {
                    hide_deadline = Some(Instant::now() + timeout.as_duration());
                }
                Effect::CancelOverlayHide => hide_deadline = None,
                Effect::ScheduleLiveEdgePoll(delay) => {
                    poll_deadline = Some(Instant::now() + delay);
                }
                Effect::SchedulePipStopGrace(delay) => {
                    grace_deadline = Some(Instant::now() + delay);
                }
                Effect::RestoreMainWindow => forward(&ui_tx, UiEvent::RestoreMainWindow),
                Effect::PersistSettings(settings) => persist(&settings, settings_path.as_deref()),
            }
        }

        forward(&ui_tx, UiEvent::StateChanged(coordinator.snapshot()));
    }

    log::debug!("player loop stopped");
}

fn apply_command<M, P>(
    coordinator: &mut PlaybackCoordinator<M, P>,
    command: PlayerCommand,
) -> Vec<Effect>
where
    M: MediaSession,
    P: PipController,
{
    match command {
        PlayerCommand::Play => coordinator.play(),
        PlayerCommand::Pause => coordinator.pause(),
        PlayerCommand::TogglePip => coordinator.toggle_pip(),
        PlayerCommand::SetVolume(value) => coordinator.set_volume(value),
        PlayerCommand::VolumeUp => coordinator.volume_up(),
        PlayerCommand::VolumeDown => coordinator.volume_down(),
        PlayerCommand::ToggleMute => coordinator.toggle_mute(),
        PlayerCommand::SwitchSource(url) => coordinator.switch_source(&url),
        PlayerCommand::Pointer(event) => coordinator.on_pointer(event),
        PlayerCommand::SetOverlayTimeout(secs) => coordinator.set_overlay_timeout(secs),
        PlayerCommand::SetTitleOverride(title) => coordinator.set_title_override(title),
    }
}

fn forward(ui_tx: &mpsc::UnboundedSender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        log::debug!("UI receiver dropped, event discarded");
    }
}

fn persist(settings: &Settings, path: Option<&std::path::Path>) {
    let result = match path {
        Some(path) => config::save_to_path(settings, path),
        None => config::save(settings),
    };
    if let Err(err) = result {
        log::warn!("failed to persist settings: {err}");
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
