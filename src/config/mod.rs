// src/config/mod.rs

//! Package configuration.
//!
//! - [`model`] holds the raw TOML-facing structs and the resolved
//!   [`PackageConfig`] shared by every stage.
//! - [`resolve`] turns a [`model::RawPackageConfig`] into a validated
//!   [`PackageConfig`] (mandatory-field checks + path defaulting).
//! - [`loader`] reads TOML from disk.

pub mod loader;
pub mod model;
pub mod resolve;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{PackageConfig, RawPackageConfig, RawPackageSection, RunSection, SigningConfig};
