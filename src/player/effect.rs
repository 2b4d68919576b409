// SPDX-License-Identifier: MPL-2.0
//! Side-effect commands produced by the coordinator.
//!
//! The coordinator drives the media session and the PiP controller directly
//! through their ports, but everything that belongs to the hosting front end
//! (animations, timers, window focus, settings persistence) is expressed as
//! an [`Effect`] for the caller to execute. The bundled tokio driver handles
//! all of them; a custom front end can do the same.

use crate::config::Settings;
use crate::player::overlay::OverlayTimeout;
use std::time::Duration;

/// A command for the hosting front end.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fade the control overlay in.
    AnimateOverlayShow,
    /// Fade the control overlay out.
    AnimateOverlayHide,
    /// Arm (or re-arm) the one-shot auto-hide countdown.
    ///
    /// When it fires, deliver `on_auto_hide_elapsed` to the coordinator.
    ScheduleOverlayHide(OverlayTimeout),
    /// Cancel any running auto-hide countdown.
    CancelOverlayHide,
    /// Arm a one-shot live-edge poll.
    ///
    /// When it fires, deliver `on_live_edge_poll` to the coordinator.
    ScheduleLiveEdgePoll(Duration),
    /// Arm the bounded wait for a PiP stop confirmation during a source
    /// switch. When it fires, deliver `on_pip_stop_timeout`.
    SchedulePipStopGrace(Duration),
    /// Bring the main window back to the front (PiP restore).
    RestoreMainWindow,
    /// Write the given settings to disk.
    PersistSettings(Settings),
}
