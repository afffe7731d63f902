//! Game settings and preferences
//!
//! Stored as JSON next to the game data. Keys missing from the file keep
//! their defaults, so old files keep loading as settings are added.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_RATE;
use crate::error::{AmazeError, Result};

/// Default settings file name
pub const SETTINGS_FILE: &str = "amaze.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Window size in pixels. Keep the proportions of the physical screen so
    /// full screen looks the same.
    pub window_width: u32,
    pub window_height: u32,
    pub fullscreen: bool,
    /// Frames per second. Every in-game delay is counted in frames.
    pub frame_rate: u32,

    // === Game ===
    /// Level loaded at start-up
    pub start_level: usize,
    /// Where level files live; searched for when unset
    pub data_dir: Option<PathBuf>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 500,
            fullscreen: false,
            frame_rate: FRAME_RATE,

            start_level: 0,
            data_dir: None,

            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(AmazeError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| AmazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
