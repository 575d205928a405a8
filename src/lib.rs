// SPDX-License-Identifier: MPL-2.0
//! `model_carousel` is the state controller behind an AR-ready 3D model
//! gallery: an ordered catalog of assets, cyclic carousel navigation, and a
//! viewer that tracks each selection's load and animation lifecycle while
//! driving an embedded rendering surface it does not own.
//!
//! The rendering engine is external and reports load outcomes
//! asynchronously; outcomes are matched to the selection that caused them by
//! binding token, so rapid navigation can never let a superseded load
//! overwrite the current asset's state.

#![doc(html_root_url = "https://docs.rs/model_carousel/0.1.0")]

pub mod catalog;
pub mod config;
pub mod error;
pub mod surface;
pub mod viewer;

pub use catalog::{AssetDescriptor, Catalog};
pub use error::{Error, Result};
pub use surface::{BindingToken, HeadlessSurface, RenderSurface, StageSettings};
pub use viewer::{AnimationPhase, GalleryInfo, Input, LoadPhase, Viewer, ViewerOptions};
