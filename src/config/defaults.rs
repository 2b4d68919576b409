// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Volume**: Audio playback volume settings
//! - **Overlay**: Control-overlay auto-hide timeout
//! - **Live streams**: Live-edge resolution and seek tolerance
//! - **PiP**: Picture-in-picture stop grace period

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume adjustment step per key press (5%).
pub const VOLUME_STEP: f32 = 0.05;

// ==========================================================================
// Overlay/Timeout Defaults
// ==========================================================================

/// Default auto-hide timeout for the control overlay (in seconds).
pub const DEFAULT_OVERLAY_TIMEOUT_SECS: u32 = 3;

/// Minimum overlay timeout (in seconds).
pub const MIN_OVERLAY_TIMEOUT_SECS: u32 = 1;

/// Maximum overlay timeout (in seconds).
pub const MAX_OVERLAY_TIMEOUT_SECS: u32 = 30;

// ==========================================================================
// Live Stream Defaults
// ==========================================================================

/// Delay between live-edge resolution attempts (in milliseconds).
///
/// Freshly bound live streams may not report a seekable range immediately;
/// the coordinator polls at this interval until one appears.
pub const LIVE_EDGE_POLL_DELAY_MS: u64 = 400;

/// Maximum number of live-edge resolution attempts before playing anyway.
pub const MAX_LIVE_EDGE_ATTEMPTS: u8 = 5;

/// Seek tolerance when jumping to the live edge (in milliseconds).
///
/// A generous tolerance lets the media framework land on a nearby keyframe
/// instead of decoding from the previous one.
pub const LIVE_SEEK_TOLERANCE_MS: u64 = 500;

// ==========================================================================
// PiP Defaults
// ==========================================================================

/// How long a source switch waits for a PiP stop confirmation before
/// proceeding with the rebind anyway (in milliseconds).
pub const PIP_STOP_GRACE_MS: u64 = 500;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Volume validation
    assert!(MIN_VOLUME >= 0.0);
    assert!(MAX_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME >= MIN_VOLUME);
    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_STEP > 0.0);

    // Overlay timeout validation
    assert!(MIN_OVERLAY_TIMEOUT_SECS > 0);
    assert!(MAX_OVERLAY_TIMEOUT_SECS >= MIN_OVERLAY_TIMEOUT_SECS);
    assert!(DEFAULT_OVERLAY_TIMEOUT_SECS >= MIN_OVERLAY_TIMEOUT_SECS);
    assert!(DEFAULT_OVERLAY_TIMEOUT_SECS <= MAX_OVERLAY_TIMEOUT_SECS);

    // Live stream validation
    assert!(LIVE_EDGE_POLL_DELAY_MS > 0);
    assert!(MAX_LIVE_EDGE_ATTEMPTS > 0);

    // PiP validation
    assert!(PIP_STOP_GRACE_MS > 0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_defaults_are_valid() {
        assert_eq!(DEFAULT_VOLUME, 0.8);
        assert!(DEFAULT_VOLUME >= MIN_VOLUME);
        assert!(DEFAULT_VOLUME <= MAX_VOLUME);
        assert!(VOLUME_STEP > 0.0);
    }

    #[test]
    fn overlay_timeout_defaults_are_valid() {
        assert_eq!(DEFAULT_OVERLAY_TIMEOUT_SECS, 3);
        assert!(DEFAULT_OVERLAY_TIMEOUT_SECS >= MIN_OVERLAY_TIMEOUT_SECS);
        assert!(DEFAULT_OVERLAY_TIMEOUT_SECS <= MAX_OVERLAY_TIMEOUT_SECS);
    }

    #[test]
    fn live_edge_defaults_are_valid() {
        assert_eq!(LIVE_EDGE_POLL_DELAY_MS, 400);
        assert_eq!(MAX_LIVE_EDGE_ATTEMPTS, 5);
    }

    #[test]
    fn pip_stop_grace_is_bounded() {
        // The grace period must stay short: it delays a user-visible source
        // switch when the platform never confirms the stop.
        assert!(PIP_STOP_GRACE_MS <= 1000);
    }
}
