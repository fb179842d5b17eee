//! Editor settings
//!
//! Stored as YAML; every section and field is optional in the file.
//!
//! ```yaml
//! export:
//!   file_name: edited.wav
//!   directory: /home/me/Music/edits
//! controls:
//!   default_speed: 1.0
//!   default_volume: 1.0
//!   rate_policy: legacy_offset   # or: preserve
//! display:
//!   waveform_width: 800
//!   waveform_height: 200
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::default_export_dir;
use crate::export::DEFAULT_EXPORT_FILE_NAME;
use crate::wav::RatePolicy;

/// Speed slider bounds
const SPEED_RANGE: (f64, f64) = (0.1, 4.0);

/// Volume slider bounds
const VOLUME_RANGE: (f64, f64) = (0.0, 4.0);

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Where and how exports are written
    pub export: ExportConfig,
    /// Initial control values
    pub controls: ControlsConfig,
    /// Waveform overview size
    pub display: DisplayConfig,
}

impl EditorConfig {
    /// Clamp out-of-range values read from disk
    pub fn validate(&mut self) {
        self.controls.validate();
        self.display.validate();
        if self.export.file_name.trim().is_empty() {
            self.export.file_name = DEFAULT_EXPORT_FILE_NAME.to_string();
        }
    }
}

/// Export section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the exported file
    pub file_name: String,
    /// Target directory; `None` means the user's downloads folder
    pub directory: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            directory: None,
        }
    }
}

impl ExportConfig {
    /// Directory exports are written to
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_export_dir)
    }
}

/// Controls section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Speed control value on startup (0.1 - 4.0)
    pub default_speed: f64,
    /// Volume control value on startup (0.0 - 4.0)
    pub default_volume: f64,
    /// How exported headers declare their sample rate
    pub rate_policy: RatePolicy,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            default_speed: 1.0,
            default_volume: 1.0,
            rate_policy: RatePolicy::LegacyOffset,
        }
    }
}

impl ControlsConfig {
    /// Clamp defaults to the slider ranges; non-finite values reset to unity
    pub fn validate(&mut self) {
        self.default_speed = clamp_or_unity(self.default_speed, SPEED_RANGE);
        self.default_volume = clamp_or_unity(self.default_volume, VOLUME_RANGE);
    }
}

fn clamp_or_unity(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        1.0
    }
}

/// Display section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Waveform overview width in pixel columns
    pub waveform_width: usize,
    /// Waveform overview height in pixels
    pub waveform_height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            waveform_width: 800,
            waveform_height: 200,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&mut self) {
        self.waveform_width = self.waveform_width.clamp(1, 16384);
        self.waveform_height = self.waveform_height.clamp(1, 4096);
    }
}
