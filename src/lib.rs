// SPDX-License-Identifier: MPL-2.0
//! `pip_player` coordinates playback, picture-in-picture and overlay
//! visibility for an embedded video player view.
//!
//! The crate is front-end agnostic: platform media and PiP integrations plug
//! in through the traits in [`port`], UI work comes back out as
//! [`player::Effect`] values (or [`player::UiEvent`]s when running the
//! bundled tokio driver), and user preferences persist through [`config`].

#![doc(html_root_url = "https://docs.rs/pip_player/0.1.0")]

pub mod config;
pub mod error;
pub mod player;
pub mod port;

#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
