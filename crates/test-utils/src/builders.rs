#![allow(dead_code)]

use std::path::Path;

use pkgflow::config::{PackageConfig, RawPackageConfig, SigningConfig};
use pkgflow::types::FailurePolicy;

/// Builder for `PackageConfig` to simplify test setup.
pub struct PackageConfigBuilder {
    raw: RawPackageConfig,
}

impl PackageConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawPackageConfig::default(),
        }
    }

    /// Minimal valid config rooted at `base`: `Simple` / `com.simple` /
    /// `1.0.0`, source under `base/src`, fake install location.
    pub fn simple(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self::new()
            .title("Simple")
            .id("com.simple")
            .version("1.0.0")
            .base_path(base)
            .source_path(base.join("src"))
            .install_path("/fake/install/path")
    }

    pub fn title(mut self, title: &str) -> Self {
        self.raw.package.title = Some(title.to_string());
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.raw.package.id = Some(id.to_string());
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.raw.package.version = Some(version.to_string());
        self
    }

    pub fn base_path(mut self, path: impl AsRef<Path>) -> Self {
        self.raw.package.base_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn source_path(mut self, path: impl AsRef<Path>) -> Self {
        self.raw.package.source_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn scripts_path(mut self, path: impl AsRef<Path>) -> Self {
        self.raw.package.scripts_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn install_path(mut self, path: impl AsRef<Path>) -> Self {
        self.raw.package.install_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn resources_path(mut self, path: impl AsRef<Path>) -> Self {
        self.raw.package.resources_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn temp_path(mut self, path: impl AsRef<Path>) -> Self {
        self.raw.package.temp_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.raw.package.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn template_value(mut self, key: &str, value: &str) -> Self {
        self.raw
            .template_values
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.raw.run.failure_policy = policy;
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.raw.run.namespace = namespace.to_string();
        self
    }

    pub fn signing(mut self, identity: &str, keychain: Option<&Path>) -> Self {
        self.raw.signing = Some(SigningConfig {
            identity: identity.to_string(),
            keychain: keychain.map(|p| p.to_path_buf()),
        });
        self
    }

    /// Raw config, pre-resolution, for tests exercising the resolver itself.
    pub fn build_raw(self) -> RawPackageConfig {
        self.raw
    }

    pub fn build(self) -> PackageConfig {
        PackageConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for PackageConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
