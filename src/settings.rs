//! Game settings and preferences
//!
//! Loaded from a JSON file next to the binary. Anything missing falls back to
//! its default, including the embedded simulation tuning.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{ConfigError, SimConfig};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    pub music_enabled: bool,

    // === Run ===
    /// Fixed seed; a time-based one is picked when absent
    pub seed: Option<u64>,
    /// Let the demo pilot fly
    pub autopilot: bool,
    /// Stop after this many frames (runs forever when absent)
    pub max_frames: Option<u64>,
    /// Sleep to hold the target frame rate; off runs as fast as possible
    pub realtime: bool,
    /// Frames between headless status lines
    pub log_interval: u64,

    // === Simulation ===
    pub sim: SimConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music_enabled: true,

            seed: None,
            autopilot: true,
            max_frames: Some(60 * 60),
            realtime: true,
            log_interval: 60,

            sim: SimConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on any problem
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate settings
    pub fn try_load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.sim.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

/// Errors that can occur while loading or saving settings
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Json(serde_json::Error),
    Config(ConfigError),
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

impl From<ConfigError> for SettingsError {
    fn from(e: ConfigError) -> Self {
        SettingsError::Config(e)
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Json(e) => write!(f, "Parse error: {}", e),
            SettingsError::Config(e) => write!(f, "Invalid simulation config: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
            SettingsError::Config(e) => Some(e),
        }
    }
}
