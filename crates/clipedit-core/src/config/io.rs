//! YAML configuration I/O
//!
//! Two loading modes: [`load_config`] never fails (missing or broken files
//! fall back to defaults, which is what the editor wants at startup), while
//! [`load_config_strict`] reports every problem for files the user named
//! explicitly.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Load configuration, falling back to `T::default()` on any problem
///
/// Problems are logged as warnings; a missing file is not a problem.
///
/// ```ignore
/// let config: EditorConfig = load_config(&Path::new("config.yaml"));
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::info!("load_config: {:?} not found, using defaults", path);
        return T::default();
    }

    match load_config_strict(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("load_config: {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Load configuration, failing if the file is missing or invalid
pub fn load_config_strict<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    log::info!("load_config: Loaded {:?}", path);
    Ok(config)
}

/// Save configuration as YAML, creating parent directories
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Saved {:?}", path);
    Ok(())
}
