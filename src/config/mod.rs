// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's persisted preferences, including loading
//! and saving them to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use pip_player::config::{self, Settings};
//!
//! // Load existing settings
//! let mut settings = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! settings.volume = Some(0.5);
//!
//! // Save the modified settings
//! config::save(&settings).expect("Failed to save settings");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PipPlayer";

/// User preferences persisted across sessions.
///
/// All fields are optional so that settings files written by older versions
/// keep loading; missing fields fall back to the defaults in
/// [`defaults`](crate::config::defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Playback volume in [0.0, 1.0].
    #[serde(default)]
    pub volume: Option<f32>,
    /// Auto-hide delay for the control overlay, in seconds.
    #[serde(default)]
    pub overlay_timeout_secs: Option<u32>,
    /// Last successfully bound source URL.
    #[serde(default)]
    pub last_source: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: Some(DEFAULT_VOLUME),
            overlay_timeout_secs: Some(DEFAULT_OVERLAY_TIMEOUT_SECS),
            last_source: None,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Settings> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Settings::default())
}

pub fn save(settings: &Settings) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(settings, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}
