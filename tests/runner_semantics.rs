// tests/runner_semantics.rs

//! Execution-order and failure-propagation behaviour of the runner,
//! exercised with plain closure stages (no collaborators involved).

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pkgflow::errors::PkgflowError;
use pkgflow::registry::{Runner, Step, TaskRegistry};
use pkgflow_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;
type EventLog = Arc<Mutex<Vec<&'static str>>>;

async fn record(log: EventLog, label: &'static str, delay_ms: u64) -> pkgflow::errors::Result<()> {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
    log.lock().unwrap().push(label);
    Ok(())
}

async fn fail() -> pkgflow::errors::Result<()> {
    Err(PkgflowError::ConfigError("induced failure".to_string()))
}

fn recording_stage(
    registry: &mut TaskRegistry,
    name: &str,
    label: &'static str,
    log: &EventLog,
    delay_ms: u64,
) {
    let log = Arc::clone(log);
    registry.stage(name, move || record(Arc::clone(&log), label, delay_ms));
}

#[tokio::test]
async fn series_runs_strictly_in_order() -> TestResult {
    with_timeout(async {
        init_tracing();

        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TaskRegistry::new("t");

        // First stage is slow; order must still hold.
        recording_stage(&mut registry, "t:a", "a", &log, 30);
        recording_stage(&mut registry, "t:b", "b", &log, 0);
        recording_stage(&mut registry, "t:c", "c", &log, 0);
        registry.series(
            "t",
            [Step::task("t:a"), Step::task("t:b"), Step::task("t:c")],
        );
        registry.validate()?;

        Runner::new(Arc::new(registry)).run("t").await?;

        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn parallel_group_is_a_barrier_for_the_next_stage() -> TestResult {
    with_timeout(async {
        init_tracing();

        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TaskRegistry::new("t");

        recording_stage(&mut registry, "t:fast", "fast", &log, 0);
        recording_stage(&mut registry, "t:medium", "medium", &log, 20);
        recording_stage(&mut registry, "t:slow", "slow", &log, 60);
        recording_stage(&mut registry, "t:after", "after", &log, 0);

        registry.parallel(
            "t:group",
            [
                Step::task("t:fast"),
                Step::task("t:medium"),
                Step::task("t:slow"),
            ],
        );
        registry.series("t", [Step::task("t:group"), Step::task("t:after")]);
        registry.validate()?;

        Runner::new(Arc::new(registry)).run("t").await?;

        let events = log.lock().unwrap().clone();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events.last(),
            Some(&"after"),
            "the stage after a parallel group must only run once every member settled, got: {events:?}"
        );
        for member in ["fast", "medium", "slow"] {
            assert!(events.contains(&member));
        }

        Ok(())
    })
    .await
}

#[tokio::test]
async fn failing_parallel_member_fails_the_group_but_siblings_complete() -> TestResult {
    with_timeout(async {
        init_tracing();

        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TaskRegistry::new("t");

        registry.stage("t:bad", fail);
        // Slower than the failing member on purpose.
        recording_stage(&mut registry, "t:slow", "slow", &log, 40);
        recording_stage(&mut registry, "t:after", "after", &log, 0);

        registry.parallel("t:group", [Step::task("t:bad"), Step::task("t:slow")]);
        registry.series("t", [Step::task("t:group"), Step::task("t:after")]);
        registry.validate()?;

        let result = Runner::new(Arc::new(registry)).run("t").await;
        assert!(result.is_err(), "group must fail as a whole");

        let events = log.lock().unwrap().clone();
        assert!(
            events.contains(&"slow"),
            "sibling branch must settle even when another member fails"
        );
        assert!(
            !events.contains(&"after"),
            "stages after a failed group must not run"
        );

        Ok(())
    })
    .await
}

#[tokio::test]
async fn series_aborts_at_first_hard_failure() -> TestResult {
    with_timeout(async {
        init_tracing();

        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TaskRegistry::new("t");

        recording_stage(&mut registry, "t:first", "first", &log, 0);
        registry.stage("t:bad", fail);
        recording_stage(&mut registry, "t:never", "never", &log, 0);

        registry.series(
            "t",
            [
                Step::task("t:first"),
                Step::task("t:bad"),
                Step::task("t:never"),
            ],
        );
        registry.validate()?;

        let result = Runner::new(Arc::new(registry)).run("t").await;
        assert!(result.is_err());
        assert_eq!(*log.lock().unwrap(), vec!["first"]);

        Ok(())
    })
    .await
}

#[tokio::test]
async fn entry_points_are_reinvokable() -> TestResult {
    with_timeout(async {
        init_tracing();

        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut registry = TaskRegistry::new("t");

        recording_stage(&mut registry, "t:a", "a", &log, 0);
        registry.series("t", [Step::task("t:a")]);
        registry.validate()?;

        let runner = Runner::new(Arc::new(registry));
        runner.run("t").await?;
        runner.run("t").await?;

        assert_eq!(*log.lock().unwrap(), vec!["a", "a"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn unknown_task_is_reported() -> TestResult {
    with_timeout(async {
        init_tracing();

        let registry = TaskRegistry::new("t");
        let err = Runner::new(Arc::new(registry))
            .run("t:nope")
            .await
            .expect_err("unknown task must fail");

        assert!(matches!(err, PkgflowError::TaskNotFound(_)), "got: {err:?}");
        Ok(())
    })
    .await
}
