//! Configuration for clipedit
//!
//! This module provides:
//!
//! - Generic YAML config loading/saving
//! - The editor's own settings (export target, control defaults, display)
//! - Standard config file locations
//!
//! # Usage
//!
//! ```ignore
//! use clipedit_core::config::{default_config_path, load_config, save_config, EditorConfig};
//!
//! let path = default_config_path();
//! let config: EditorConfig = load_config(&path);
//! save_config(&config, &path)?;
//! ```

mod editor;
mod io;
mod paths;

pub use editor::{ControlsConfig, DisplayConfig, EditorConfig, ExportConfig};
pub use io::{load_config, load_config_strict, save_config};
pub use paths::{default_config_dir, default_config_path, default_export_dir, CONFIG_FILE_NAME};
