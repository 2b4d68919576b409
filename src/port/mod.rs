// SPDX-License-Identifier: MPL-2.0
//! Ports for the platform collaborators the coordinator drives.
//!
//! The coordinator never touches the media framework or the PiP subsystem
//! directly. It talks to them through the traits defined here, and platform
//! adapters (AVFoundation, GStreamer, a test double) implement them.

pub mod media;
pub mod pip;

pub use media::{MediaError, MediaSession, TransportStatus};
pub use pip::{PipController, PipError, PipEvent};
