// crates/engine_core/src/config.rs

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use winit::keyboard::KeyCode;

use crate::assets::LoadingMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Rebinds one action (by registry name) to a physical key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub action: String,
    pub key: KeyCode,
}

/// Platform-side settings. Every field has a default so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub asset_root: PathBuf,
    pub loading: LoadingMode,
    /// Simulation step in seconds.
    pub fixed_timestep: f32,
    pub max_steps_per_frame: u32,
    pub log_filter: String,
    pub pretty_logs: bool,
    pub bindings: Vec<KeyBinding>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "Purse".to_string(),
            window_width: 1280,
            window_height: 720,
            asset_root: PathBuf::from("assets"),
            loading: LoadingMode::Sync,
            fixed_timestep: 1.0 / 60.0,
            max_steps_per_frame: 5,
            log_filter: "info".to_string(),
            pretty_logs: false,
            bindings: Vec::new(),
        }
    }
}

/// Reads and deserializes a RON file.
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
