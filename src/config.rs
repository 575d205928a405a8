// SPDX-License-Identifier: MPL-2.0
//! Persisted viewer preferences (`settings.toml`).
//!
//! # Examples
//!
//! ```no_run
//! use model_carousel::config::{self, Config};
//!
//! // Load existing configuration (missing file yields defaults).
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting and persist it.
//! config.autoplay = Some(true);
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use crate::surface::StageSettings;
use crate::viewer::{ViewerOptions, DEFAULT_LOAD_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ModelCarousel";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Start animation playback as soon as a model is ready.
    #[serde(default)]
    pub autoplay: Option<bool>,
    /// Seconds a load may stay pending before it is failed.
    #[serde(default)]
    pub load_timeout_secs: Option<u64>,
    /// Overrides for the stage presentation hints.
    #[serde(default)]
    pub stage: Option<StageSettings>,
}

impl Config {
    /// Resolves the configuration into session options, filling every
    /// missing field with its default.
    #[must_use]
    pub fn viewer_options(&self) -> ViewerOptions {
        ViewerOptions {
            autoplay: self.autoplay.unwrap_or(false),
            load_timeout: self
                .load_timeout_secs
                .map_or(DEFAULT_LOAD_TIMEOUT, Duration::from_secs),
            stage: self.stage.clone().unwrap_or_default(),
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

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
