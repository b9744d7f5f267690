// tests/registry_composition.rs

use std::error::Error;
use std::sync::Arc;

use pkgflow::errors::PkgflowError;
use pkgflow::fsops::RealFileOps;
use pkgflow::registry::{Step, TaskRegistry};
use pkgflow::render::TeraRenderer;
use pkgflow::stages::{StageContext, build_registry_with};
use pkgflow_test_utils::builders::PackageConfigBuilder;
use pkgflow_test_utils::fakes::{FakeConverter, RecordingInvoker};
use pkgflow_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

async fn noop() -> pkgflow::errors::Result<()> {
    Ok(())
}

fn fake_context(builder: PackageConfigBuilder) -> Arc<StageContext> {
    Arc::new(StageContext {
        config: Arc::new(builder.build()),
        renderer: Arc::new(TeraRenderer),
        converter: Arc::new(FakeConverter),
        invoker: Arc::new(RecordingInvoker::new()),
        fs: Arc::new(RealFileOps),
    })
}

#[test]
fn registers_the_full_stage_catalog() -> TestResult {
    init_tracing();

    let registry = build_registry_with(fake_context(PackageConfigBuilder::simple("/project")))?;
    let names = registry.task_names();

    for expected in [
        "pkg",
        "pkg:build",
        "pkg:bundle",
        "pkg:clean",
        "pkg:clean:output",
        "pkg:copy",
        "pkg:distribution",
        "pkg:resources",
        "pkg:resources:html",
        "pkg:resources:images",
        "pkg:resources:markdown",
        "pkg:scripts",
        "pkg:sign",
        "pkg:signed",
    ] {
        assert!(
            names.contains(&expected),
            "expected task '{expected}' to be registered, got: {names:?}"
        );
    }

    Ok(())
}

#[test]
fn namespace_prefixes_every_task() -> TestResult {
    init_tracing();

    let registry = build_registry_with(fake_context(
        PackageConfigBuilder::simple("/project").namespace("packaging"),
    ))?;
    let names = registry.task_names();

    assert_eq!(registry.namespace(), "packaging");
    assert!(names.contains(&"packaging"));
    assert!(names.contains(&"packaging:build"));
    assert!(names.contains(&"packaging:resources:markdown"));
    assert!(!names.iter().any(|n| n.starts_with("pkg:")));

    Ok(())
}

#[test]
fn validate_rejects_unknown_references() -> TestResult {
    init_tracing();

    let mut registry = TaskRegistry::new("t");
    registry.stage("t:real", noop);
    registry.series("t", [Step::task("t:real"), Step::task("t:missing")]);

    let err = registry.validate().expect_err("unknown reference must fail");
    match err {
        PkgflowError::TaskNotFound(msg) => {
            assert!(msg.contains("t:missing"), "got: {msg}");
        }
        other => panic!("expected TaskNotFound, got: {other:?}"),
    }

    Ok(())
}

#[test]
fn validate_rejects_cycles() -> TestResult {
    init_tracing();

    let mut registry = TaskRegistry::new("t");
    registry.series("t:a", [Step::task("t:b")]);
    registry.series("t:b", [Step::task("t:a")]);

    let err = registry.validate().expect_err("cycle must fail");
    assert!(matches!(err, PkgflowError::GraphCycle(_)), "got: {err:?}");

    Ok(())
}

#[test]
fn last_registration_wins() -> TestResult {
    init_tracing();

    let mut registry = TaskRegistry::new("t");
    registry.stage("t:x", noop);
    registry.series("t:x", [Step::task("t:y")]);
    registry.stage("t:y", noop);

    // t:x is now composed, so validation sees (and accepts) its reference.
    registry.validate()?;
    assert_eq!(registry.task_names().len(), 2);

    Ok(())
}
