// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{PackageConfig, RawPackageConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawPackageConfig`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (mandatory fields, path defaulting). Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPackageConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawPackageConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and resolve it.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Checks mandatory fields (`title`, `id`, `version`, `source_path`,
///   `install_path`), failing on the first missing one.
/// - Derives defaulted paths from `base_path`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PackageConfig> {
    let raw_config = load_from_path(&path)?;
    let config = PackageConfig::try_from(raw_config)?;
    Ok(config)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Pkgflow.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Respect an env var (e.g. `PKGFLOW_CONFIG`).
/// - Support project-local config discovery.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Pkgflow.toml")
}
