// SPDX-License-Identifier: MPL-2.0
//! Viewer controller and its session state.

mod component;
mod session;

pub use component::{Input, Viewer, ViewerOptions, DEFAULT_LOAD_TIMEOUT};
pub use session::{AnimationPhase, GalleryInfo, LoadPhase, SessionState};
