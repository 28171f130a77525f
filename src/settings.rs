//! Simulation settings
//!
//! Loaded from a JSON file; any field left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Settings for world creation and the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the asteroid field
    pub seed: u64,

    // === World ===
    pub world_width: f64,
    pub world_height: f64,
    /// Asteroids placed at startup
    pub asteroid_count: usize,
    /// Candidate draws per asteroid before giving up
    pub max_placement_attempts: u32,

    // === Runner ===
    /// Frames simulated by the native binary
    pub frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            asteroid_count: ASTEROID_COUNT,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            frames: 600,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(SimError::SettingsFormat)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like [`load`](Self::load), but any failure yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(SimError::SettingsFormat)?;
        std::fs::write(path, json).map_err(|source| SimError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(SimError::InvalidSettings(format!(
                "world must have positive size, got {}x{}",
                self.world_width, self.world_height
            )));
        }
        if self.max_placement_attempts == 0 && self.asteroid_count > 0 {
            return Err(SimError::InvalidSettings(
                "max_placement_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
