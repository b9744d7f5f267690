// tests/config_resolution.rs

use std::error::Error;
use std::path::PathBuf;

use pkgflow::config::{PackageConfig, load_and_validate};
use pkgflow_test_utils::builders::PackageConfigBuilder;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn minimal_config_resolves_with_documented_defaults() -> TestResult {
    let cfg = PackageConfigBuilder::simple("/project").build();

    assert_eq!(cfg.source_path, PathBuf::from("/project/src"));
    assert_eq!(cfg.scripts_path, PathBuf::from("/project/scripts"));
    assert_eq!(cfg.resources_path, PathBuf::from("/project/resources"));
    assert_eq!(cfg.output_path, PathBuf::from("/project/bin"));
    assert_eq!(cfg.temp_path, PathBuf::from("/project/tmp"));
    assert_eq!(cfg.namespace, "pkg");

    Ok(())
}

#[test]
fn explicit_paths_are_not_overridden() -> TestResult {
    let cfg = PackageConfigBuilder::simple("/project")
        .temp_path("/elsewhere/scratch")
        .output_path("dist")
        .build();

    assert_eq!(cfg.temp_path, PathBuf::from("/elsewhere/scratch"));
    // Relative paths resolve against base_path.
    assert_eq!(cfg.output_path, PathBuf::from("/project/dist"));

    Ok(())
}

#[test]
fn each_mandatory_field_is_reported_by_name() -> TestResult {
    let missing_title = PackageConfigBuilder::new()
        .id("com.simple")
        .version("1.0.0")
        .base_path("/p")
        .source_path("src")
        .install_path("/fake")
        .build_raw();
    let missing_id = PackageConfigBuilder::new()
        .title("Simple")
        .version("1.0.0")
        .base_path("/p")
        .source_path("src")
        .install_path("/fake")
        .build_raw();
    let missing_version = PackageConfigBuilder::new()
        .title("Simple")
        .id("com.simple")
        .base_path("/p")
        .source_path("src")
        .install_path("/fake")
        .build_raw();
    let missing_source = PackageConfigBuilder::new()
        .title("Simple")
        .id("com.simple")
        .version("1.0.0")
        .base_path("/p")
        .install_path("/fake")
        .build_raw();
    let missing_install = PackageConfigBuilder::new()
        .title("Simple")
        .id("com.simple")
        .version("1.0.0")
        .base_path("/p")
        .source_path("src")
        .build_raw();

    for (field, raw) in [
        ("title", missing_title),
        ("id", missing_id),
        ("version", missing_version),
        ("source_path", missing_source),
        ("install_path", missing_install),
    ] {
        let err = PackageConfig::try_from(raw).expect_err("missing field must fail");
        let msg = err.to_string();
        assert!(
            msg.contains(&format!("\"{field}\"")),
            "error for missing {field} should name it, got: {msg}"
        );
    }

    Ok(())
}

#[test]
fn install_path_is_never_resolved_against_base() -> TestResult {
    let cfg = PackageConfigBuilder::simple("/project")
        .install_path("/Applications/Simple")
        .build();

    assert_eq!(cfg.install_path, PathBuf::from("/Applications/Simple"));
    Ok(())
}

#[test]
fn config_fields_win_over_template_values_on_collision() -> TestResult {
    let cfg = PackageConfigBuilder::simple("/project")
        .template_value("title", "Shadowed")
        .template_value("year", "2026")
        .build();

    let json = cfg.template_context().into_json();
    assert_eq!(json["title"], "Simple");
    assert_eq!(json["year"], "2026");

    Ok(())
}

#[test]
fn artifact_paths_derive_from_identity() -> TestResult {
    let cfg = PackageConfigBuilder::simple("/project").build();

    assert_eq!(cfg.package_file_name(), "Simple-1.0.0.pkg");
    assert_eq!(
        cfg.intermediate_package(),
        PathBuf::from("/project/tmp/packages/Simple.pkg")
    );
    assert_eq!(
        cfg.bundled_package(),
        PathBuf::from("/project/tmp/Simple-1.0.0.pkg")
    );
    assert_eq!(
        cfg.final_package(),
        PathBuf::from("/project/bin/Simple-1.0.0.pkg")
    );

    Ok(())
}

#[test]
fn toml_round_trip_through_loader() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("Pkgflow.toml");

    std::fs::write(
        &config_path,
        r#"
[package]
title = "Simple"
id = "com.simple"
version = "1.0.0"
base_path = "/project"
source_path = "src"
install_path = "/fake/install/path"

[run]
failure_policy = "strict"
namespace = "packaging"

[template_values]
year = "2026"
"#,
    )?;

    let cfg = load_and_validate(&config_path)?;

    assert_eq!(cfg.title, "Simple");
    assert_eq!(cfg.namespace, "packaging");
    assert_eq!(cfg.failure_policy, pkgflow::types::FailurePolicy::Strict);
    assert_eq!(cfg.template_values["year"], "2026");
    assert_eq!(cfg.source_path, PathBuf::from("/project/src"));

    Ok(())
}
