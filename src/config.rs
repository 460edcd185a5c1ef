use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::ops::progress::clamp_volume;
use crate::types::control_mode::DEFAULT_BREAKPOINT_PX;

/// Player settings. Every field has a default, so partial files are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Viewport width below which the native control strip is used.
    pub breakpoint_px: f32,
    /// Progress sampling cadence while playing.
    pub sample_interval_ms: u64,
    pub initial_volume: f64,
    pub start_muted: bool,
    pub window_size: [f32; 2],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            sample_interval_ms: 1000,
            initial_volume: 1.0,
            start_muted: false,
            window_size: [1024.0, 640.0],
        }
    }
}

impl PlayerConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    /// Volume to apply on mount, clamped to `[0, 1]`.
    pub fn effective_volume(&self) -> f64 {
        clamp_volume(self.initial_volume).unwrap_or(1.0)
    }

    /// Save the config to a JSON file at the given path.
    pub fn save_to_file(&self, path: &Path) -> Result<(), PlayerError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load a config from a JSON file at the given path.
    pub fn load_from_file(path: &Path) -> Result<PlayerConfig, PlayerError> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        Ok(serde_json::from_str(&json)?)
    }
}
