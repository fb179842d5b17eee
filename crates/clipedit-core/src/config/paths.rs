//! Standard locations for clipedit files

use std::path::PathBuf;

/// File name of the editor config inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Get the config directory
///
/// Returns: `<platform config dir>/clipedit` (e.g. `~/.config/clipedit`),
/// or `./clipedit` when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clipedit")
}

/// Get the default config file path
///
/// Returns: `<config dir>/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}

/// Where exports go when the config names no directory
///
/// Returns the user's download directory, falling back to the current
/// directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
