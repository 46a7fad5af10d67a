// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON in `$XDG_CONFIG_HOME/filmcam/config.json`. A missing or
//! unreadable file yields the defaults.

use crate::constants::encoding::{FILTERED_MIN_QUALITY, MAX_QUALITY};
use crate::constants::storage::{APP_DIR_NAME, CONFIG_FILE};
use crate::constants::workers::default_filter_workers;
use crate::errors::{AppError, AppResult};
use crate::film::FilmType;
use crate::pipelines::photo::EncodingQuality;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Film selected when a session starts
    pub film_type: FilmType,
    /// Where captures are written (default: ~/Pictures/filmcam)
    pub photo_dir: Option<PathBuf>,
    /// JPEG quality for filtered output
    pub jpeg_quality: u8,
    /// Concurrent filter jobs (default: available cores, at most 4)
    pub filter_workers: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            film_type: FilmType::default(),
            photo_dir: None,
            jpeg_quality: EncodingQuality::High.jpeg_quality(),
            filter_workers: None,
        }
    }
}

impl Config {
    /// Filtered output quality, never below 90
    pub fn filtered_quality(&self) -> u8 {
        self.jpeg_quality.clamp(FILTERED_MIN_QUALITY, MAX_QUALITY)
    }

    /// Configured worker count or the machine default
    pub fn filter_workers(&self) -> usize {
        self.filter_workers
            .filter(|&n| n > 0)
            .unwrap_or_else(default_filter_workers)
    }

    /// Configured photo directory or `~/Pictures/filmcam`
    pub fn photo_dir(&self) -> PathBuf {
        self.photo_dir
            .clone()
            .unwrap_or_else(crate::storage::default_photo_directory)
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|path| path.join(APP_DIR_NAME).join(CONFIG_FILE))
}

/// Load the config from its default location
pub fn load() -> Config {
    match default_config_path() {
        Some(path) => load_from_path(&path),
        None => Config::default(),
    }
}

/// Save the config to its default location
pub fn save(config: &Config) -> AppResult<()> {
    let path = default_config_path()
        .ok_or_else(|| AppError::Config("No config directory available".to_string()))?;
    save_to_path(config, &path)
}

/// Load a config file, falling back to defaults
pub fn load_from_path(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Config::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config, using defaults");
            return Config::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
        Config::default()
    })
}

/// Write a config file, creating parent directories
pub fn save_to_path(config: &Config, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content =
        serde_json::to_string_pretty(config).map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, content)?;
    Ok(())
}
