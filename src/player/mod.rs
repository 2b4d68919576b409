// SPDX-License-Identifier: MPL-2.0
//! Player state machines and the coordinator that ties them together.

pub mod coordinator;
pub mod driver;
pub mod effect;
pub mod overlay;
pub mod source;
pub mod state;
pub mod volume;

pub use coordinator::{PlaybackCoordinator, PlayerSnapshot};
pub use driver::{spawn, PlayerCommand, PlayerHandle, UiEvent};
pub use effect::Effect;
pub use overlay::{OverlayTimeout, OverlayVisibility, PointerEvent};
pub use source::{SourceError, SourceUrl};
pub use state::{PipState, PlaybackState};
pub use volume::{Volume, VolumeControl};
