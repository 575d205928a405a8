// SPDX-License-Identifier: MPL-2.0
//! Asset catalog: the ordered, read-only list of 3D models the gallery
//! presents.
//!
//! A catalog is built once at startup, either from the built-in sample
//! gallery or from a TOML file of `[[asset]]` tables, and is never mutated
//! afterwards. Everything downstream (carousel adjacency, the viewer's
//! selection) refers to assets by their catalog id.

pub mod carousel;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One 3D model entry: geometry location plus display metadata.
///
/// URLs are opaque strings; they are passed through to the rendering surface
/// unmodified and never fetched by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Unique identifier used for selection and adjacency.
    pub id: String,
    /// Location of the model geometry.
    #[serde(rename = "model")]
    pub asset_url: String,
    /// Preview image shown in the carousel strip.
    #[serde(rename = "poster")]
    pub poster_url: String,
    pub title: String,
    pub description: String,
}

/// On-disk catalog shape: a sequence of `[[asset]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "asset")]
    assets: Vec<AssetDescriptor>,
}

/// Ordered catalog of assets. Read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    assets: Vec<AssetDescriptor>,
}

impl Catalog {
    /// Builds a catalog from descriptors, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when an id or model URL is blank or when two
    /// descriptors share an id.
    pub fn new(assets: Vec<AssetDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for asset in &assets {
            if asset.id.trim().is_empty() {
                return Err(Error::Parse("asset with blank id".to_string()));
            }
            if asset.asset_url.trim().is_empty() {
                return Err(Error::Parse(format!(
                    "asset {:?} has no model URL",
                    asset.id
                )));
            }
            if !seen.insert(asset.id.as_str()) {
                return Err(Error::Parse(format!("duplicate asset id {:?}", asset.id)));
            }
        }
        Ok(Self { assets })
    }

    /// The built-in three-model gallery used when no catalog file is given.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            assets: vec![
                AssetDescriptor {
                    id: "astronaut".to_string(),
                    asset_url: "https://modelviewer.dev/shared-assets/models/Astronaut.glb"
                        .to_string(),
                    poster_url: "https://modelviewer.dev/assets/poster-astronaut.png".to_string(),
                    title: "Space Explorer".to_string(),
                    description: "A detailed astronaut model ready for space exploration missions."
                        .to_string(),
                },
                AssetDescriptor {
                    id: "robot-expressive".to_string(),
                    asset_url: "https://modelviewer.dev/shared-assets/models/RobotExpressive.glb"
                        .to_string(),
                    poster_url: "https://modelviewer.dev/assets/poster-robot.png".to_string(),
                    title: "Expressive Robot".to_string(),
                    description: "An animated robot with expressive features and smooth movements."
                        .to_string(),
                },
                AssetDescriptor {
                    id: "horse".to_string(),
                    asset_url: "https://modelviewer.dev/shared-assets/models/Horse.glb".to_string(),
                    poster_url: "https://modelviewer.dev/assets/poster-horse.png".to_string(),
                    title: "Majestic Horse".to_string(),
                    description: "A beautiful horse model with realistic proportions and textures."
                        .to_string(),
                },
            ],
        }
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on malformed TOML or invalid descriptors.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.assets)
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::Parse`] when its contents are invalid.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// All descriptors in catalog order.
    #[must_use]
    pub fn descriptors(&self) -> &[AssetDescriptor] {
        &self.assets
    }

    /// Looks up a descriptor by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the id is absent.
    pub fn get(&self, id: &str) -> Result<&AssetDescriptor> {
        self.assets
            .iter()
            .find(|asset| asset.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Position of an id in the catalog order, if present.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.assets.iter().position(|asset| asset.id == id)
    }

    /// The first descriptor, which every new session starts on.
    #[must_use]
    pub fn first(&self) -> Option<&AssetDescriptor> {
        self.assets.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
