// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::types::FailurePolicy;

/// Top-level configuration as read from a TOML file.
///
/// This is a direct mapping of a `Pkgflow.toml`:
///
/// ```toml
/// [package]
/// title = "MyApp"
/// id = "com.example.myapp"
/// version = "1.2.3"
/// source_path = "build/root"
/// install_path = "/Applications/MyApp"
///
/// [template_values]
/// year = "2026"
///
/// [signing]
/// identity = "Developer ID Installer: Example Corp"
/// ```
///
/// Only `[package]` carries mandatory fields; everything else defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPackageConfig {
    /// Identity and filesystem roots from `[package]`.
    #[serde(default)]
    pub package: RawPackageSection,

    /// Optional `[signing]` section; required only when the signed entry
    /// point is invoked.
    #[serde(default)]
    pub signing: Option<SigningConfig>,

    /// Execution behaviour from `[run]`.
    #[serde(default)]
    pub run: RunSection,

    /// Arbitrary values merged into every template render from
    /// `[template_values]`.
    #[serde(default)]
    pub template_values: BTreeMap<String, String>,
}

/// `[package]` section, pre-validation.
///
/// All fields are optional at the serde level; [`crate::config::resolve`]
/// enforces which ones are actually mandatory and derives the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPackageSection {
    /// Display name, also used in artifact file names.
    #[serde(default)]
    pub title: Option<String>,

    /// Reverse-domain package identifier (e.g. `com.example.myapp`).
    #[serde(default)]
    pub id: Option<String>,

    /// Semantic version string.
    #[serde(default)]
    pub version: Option<String>,

    /// Project root; relative paths below resolve against it.
    ///
    /// Defaults to the current working directory.
    #[serde(default)]
    pub base_path: Option<PathBuf>,

    /// Tree to package (the payload handed to the packaging tool).
    #[serde(default)]
    pub source_path: Option<PathBuf>,

    /// Pre/post-install scripts to render into the temp workspace.
    ///
    /// Defaults to `base_path/scripts`.
    #[serde(default)]
    pub scripts_path: Option<PathBuf>,

    /// Install location on the destination machine. Never resolved against
    /// `base_path`.
    #[serde(default)]
    pub install_path: Option<PathBuf>,

    /// License/readme/image assets. Defaults to `base_path/resources`.
    #[serde(default)]
    pub resources_path: Option<PathBuf>,

    /// Scratch workspace for intermediate artifacts. Safe to delete
    /// wholesale. Defaults to `base_path/tmp`.
    #[serde(default)]
    pub temp_path: Option<PathBuf>,

    /// Final artifact destination. Defaults to `base_path/bin`.
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Optional override for the distribution manifest template; the bundled
    /// template is used when absent.
    #[serde(default)]
    pub distribution_template: Option<PathBuf>,
}

/// `[signing]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SigningConfig {
    /// Identity passed to the signing tool.
    pub identity: String,

    /// Keychain holding the identity; unlocked before signing when set.
    #[serde(default)]
    pub keychain: Option<PathBuf>,
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// What to do when an external packaging tool exits nonzero.
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Prefix for every registered task name (e.g. `pkg` gives
    /// `pkg:build`, `pkg:resources`, ...).
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    "pkg".to_string()
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            namespace: default_namespace(),
        }
    }
}

/// Fully-resolved configuration shared by reference across every stage.
///
/// Immutable after construction: stages read it through an `Arc` and never
/// hold a mutable alias. All paths are absolute or base-relative-resolved by
/// the time this struct exists.
#[derive(Debug, Clone)]
pub struct PackageConfig {
    pub title: String,
    pub id: String,
    pub version: String,
    pub base_path: PathBuf,
    pub source_path: PathBuf,
    pub scripts_path: PathBuf,
    pub install_path: PathBuf,
    pub resources_path: PathBuf,
    pub temp_path: PathBuf,
    pub output_path: PathBuf,
    pub distribution_template: Option<PathBuf>,
    pub signing: Option<SigningConfig>,
    pub failure_policy: FailurePolicy,
    pub namespace: String,
    pub template_values: BTreeMap<String, String>,
}

impl PackageConfig {
    /// Rendered + converted resource files live here.
    pub fn resources_tmp(&self) -> PathBuf {
        self.temp_path.join("resources")
    }

    /// Rendered install scripts live here; the packaging tool reads this
    /// directory from disk.
    pub fn scripts_tmp(&self) -> PathBuf {
        self.temp_path.join("scripts")
    }

    /// Scratch directory for rendered markdown awaiting document conversion.
    pub fn render_tmp(&self) -> PathBuf {
        self.temp_path.join("render")
    }

    /// Intermediate package files produced by the packaging tool.
    pub fn packages_tmp(&self) -> PathBuf {
        self.temp_path.join("packages")
    }

    /// Rendered distribution manifest location.
    pub fn distribution_manifest(&self) -> PathBuf {
        self.temp_path.join("distribution.xml")
    }

    /// `{title}-{version}.pkg`
    pub fn package_file_name(&self) -> String {
        format!("{}-{}.pkg", self.title, self.version)
    }

    /// Intermediate package produced by the packaging tool:
    /// `temp/packages/{title}.pkg`.
    pub fn intermediate_package(&self) -> PathBuf {
        self.packages_tmp().join(format!("{}.pkg", self.title))
    }

    /// Bundled (pre-sign) package: `temp/{title}-{version}.pkg`.
    pub fn bundled_package(&self) -> PathBuf {
        self.temp_path.join(self.package_file_name())
    }

    /// Final artifact: `output/{title}-{version}.pkg`, signed or not
    /// depending on the entry point invoked.
    pub fn final_package(&self) -> PathBuf {
        self.output_path.join(self.package_file_name())
    }

    /// Build the merged render context used by every template stage.
    ///
    /// `template_values` go in first, then the config's own fields, so
    /// explicit config fields win on key collision.
    pub fn template_context(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        for (key, value) in &self.template_values {
            ctx.insert(key.as_str(), value);
        }
        ctx.insert("title", &self.title);
        ctx.insert("id", &self.id);
        ctx.insert("version", &self.version);
        ctx.insert("install_path", &self.install_path.display().to_string());
        ctx.insert("source_path", &self.source_path.display().to_string());
        ctx.insert("base_path", &self.base_path.display().to_string());
        ctx.insert("output_path", &self.output_path.display().to_string());
        ctx.insert("temp_path", &self.temp_path.display().to_string());
        ctx
    }
}
