// src/config/resolve.rs

use std::path::{Path, PathBuf};

use crate::config::model::{PackageConfig, RawPackageConfig};
use crate::errors::{PkgflowError, Result};

impl TryFrom<RawPackageConfig> for PackageConfig {
    type Error = crate::errors::PkgflowError;

    fn try_from(raw: RawPackageConfig) -> std::result::Result<Self, Self::Error> {
        resolve_raw_config(raw)
    }
}

/// Validate mandatory fields and derive defaulted paths.
///
/// Fails on the *first* missing mandatory field, before any task exists.
/// Defaulting rules (applied only when the field is omitted):
///
/// - `scripts_path`   := base_path/scripts
/// - `resources_path` := base_path/resources
/// - `output_path`    := base_path/bin
/// - `temp_path`      := base_path/tmp
///
/// Relative paths resolve against `base_path`, except `install_path`, which
/// names a location on the destination machine and is taken verbatim.
fn resolve_raw_config(raw: RawPackageConfig) -> Result<PackageConfig> {
    let pkg = raw.package;

    let title = require(pkg.title, "title")?;
    let id = require(pkg.id, "id")?;
    let version = require(pkg.version, "version")?;

    let base_path = match pkg.base_path {
        Some(p) => p,
        None => std::env::current_dir()?,
    };

    let source_path = resolve_against(&base_path, require(pkg.source_path, "source_path")?);
    let install_path = require(pkg.install_path, "install_path")?;

    let scripts_path = pkg
        .scripts_path
        .map(|p| resolve_against(&base_path, p))
        .unwrap_or_else(|| base_path.join("scripts"));
    let resources_path = pkg
        .resources_path
        .map(|p| resolve_against(&base_path, p))
        .unwrap_or_else(|| base_path.join("resources"));
    let output_path = pkg
        .output_path
        .map(|p| resolve_against(&base_path, p))
        .unwrap_or_else(|| base_path.join("bin"));
    let temp_path = pkg
        .temp_path
        .map(|p| resolve_against(&base_path, p))
        .unwrap_or_else(|| base_path.join("tmp"));
    let distribution_template = pkg
        .distribution_template
        .map(|p| resolve_against(&base_path, p));

    Ok(PackageConfig {
        title,
        id,
        version,
        base_path,
        source_path,
        scripts_path,
        install_path,
        resources_path,
        temp_path,
        output_path,
        distribution_template,
        signing: raw.signing,
        failure_policy: raw.run.failure_policy,
        namespace: raw.run.namespace,
        template_values: raw.template_values,
    })
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| {
        PkgflowError::ConfigError(format!(
            "required field \"{field}\" was not provided in [package]"
        ))
    })
}

fn resolve_against(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}
