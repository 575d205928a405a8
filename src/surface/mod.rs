// SPDX-License-Identifier: MPL-2.0
//! The rendering-surface seam.
//!
//! The 3D/AR engine that actually draws models is not part of this crate; it
//! is driven through the [`RenderSurface`] trait. Loading is asynchronous
//! from the surface's point of view: `load` returns immediately and the
//! outcome arrives later through the [`EventSink`] the surface was handed.
//! Playback and camera commands are advisory, so a surface is free to reject
//! them.

pub mod binding;
pub mod headless;

pub use binding::{BindingToken, EventSink, SurfaceBinding, TaggedEvent};
pub use headless::HeadlessSurface;

use serde::{Deserialize, Serialize};

/// AR presentation modes, in preference order, offered when launching an AR
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArMode {
    WebXr,
    SceneViewer,
    QuickLook,
}

/// Presentation hints applied to the surface on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Spin the model while idle.
    pub auto_rotate: bool,
    /// Idle spin speed in degrees per second.
    pub rotation_per_second: f32,
    pub shadow_intensity: f32,
    pub exposure: f32,
    /// Named environment map used for image-based lighting.
    pub environment_image: String,
    pub ar_modes: Vec<ArMode>,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            rotation_per_second: 20.0,
            shadow_intensity: 1.0,
            exposure: 1.0,
            environment_image: "neutral".to_string(),
            ar_modes: vec![ArMode::WebXr, ArMode::SceneViewer, ArMode::QuickLook],
        }
    }
}

/// A load notification reported by the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The model finished loading and is visible.
    Loaded,
    /// The load failed; the payload is a surface-specific reason.
    Failed(String),
}

/// Commands understood by an embedded rendering surface.
///
/// Implementations live outside this crate (the in-tree [`HeadlessSurface`]
/// exists for tests and the demo binary). All methods are synchronous calls
/// on the session's single logical thread; only load *outcomes* arrive
/// later, through the sink.
pub trait RenderSurface {
    /// Begins loading the model at `url`, applying `settings` to the stage.
    ///
    /// The outcome must be reported through `events` — at most one
    /// notification per load; the sink drops extras.
    fn load(&mut self, url: &str, settings: &StageSettings, events: EventSink);

    /// Starts animation playback. Returns `false` when the surface rejects
    /// the command, for example because the model has no animation track.
    fn play(&mut self) -> bool;

    /// Pauses animation playback. Returns `false` on rejection.
    fn pause(&mut self) -> bool;

    /// Restores the default camera framing.
    fn reset_camera(&mut self);

    /// Asks the surface to enter an AR session using the first mode it
    /// supports. Returns `false` when none is available.
    fn activate_ar(&mut self, modes: &[ArMode]) -> bool;
}
