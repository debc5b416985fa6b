// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; durations and probabilities are
/// checked by [`load_and_validate`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults for missing sections and keys.
/// - Parses duration strings and checks probability ranges and a non-zero
///   tick / task duration.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `path` if given, else `EeLink.toml` from the working directory when
/// it exists, else the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    match resolve_config_path(path, &default_config_path()) {
        Some(path) => {
            debug!(path = %path.display(), "loading simulator config");
            load_and_validate(path)
        }
        None => {
            debug!("no config file; using built-in defaults");
            Ok(ConfigFile::default())
        }
    }
}

/// Pick the config file to load: an explicit path always wins, otherwise
/// `fallback` is used if it exists on disk.
pub fn resolve_config_path(explicit: Option<&Path>, fallback: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if fallback.is_file() => Some(fallback.to_path_buf()),
        None => None,
    }
}

/// Conventional config file name in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("EeLink.toml")
}
