// src/registry/runner.rs

//! Execution of registered tasks.

use std::sync::Arc;
use std::time::Instant;

use anyhow::anyhow;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::{PkgflowError, Result};
use crate::registry::registry::TaskRegistry;
use crate::registry::task::{StageFuture, Step, TaskKind, TaskName};

/// Executes named tasks against a shared, read-only [`TaskRegistry`].
#[derive(Debug, Clone)]
pub struct Runner {
    registry: Arc<TaskRegistry>,
}

impl Runner {
    pub fn new(registry: Arc<TaskRegistry>) -> Self {
        Self { registry }
    }

    /// Run the named task to completion.
    ///
    /// - A series aborts at the first hard failure; later steps do not run.
    /// - A parallel group waits for **all** members to settle, then reports
    ///   the first failure. Sibling branches are not cancelled and their
    ///   completed writes to the temp workspace are left in place, to be
    ///   cleared by the next `clean`.
    pub async fn run(&self, name: &str) -> Result<()> {
        run_named(Arc::clone(&self.registry), name.to_string()).await
    }
}

/// Recursion goes through boxed futures: `Step` trees are arbitrarily
/// nested, and parallel members must be `'static` for `JoinSet::spawn`.
fn run_named(registry: Arc<TaskRegistry>, name: TaskName) -> StageFuture {
    Box::pin(async move {
        // Clone releases the registry borrow before recursing, so the Arc
        // can be handed on to the step runner.
        let step = match registry.get(&name) {
            None => return Err(PkgflowError::TaskNotFound(name)),
            Some(TaskKind::Stage(stage_fn)) => {
                info!(task = %name, "stage starting");
                let started = Instant::now();

                let result = stage_fn().await;

                match &result {
                    Ok(()) => info!(
                        task = %name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "stage finished"
                    ),
                    Err(err) => warn!(task = %name, error = %err, "stage failed"),
                }

                return result;
            }
            Some(TaskKind::Composed(step)) => step.clone(),
        };

        debug!(task = %name, "running composed task");
        run_step(registry, step).await
    })
}

fn run_step(registry: Arc<TaskRegistry>, step: Step) -> StageFuture {
    Box::pin(async move {
        match step {
            Step::Task(name) => run_named(registry, name).await,

            Step::Series(steps) => {
                for step in steps {
                    run_step(Arc::clone(&registry), step).await?;
                }
                Ok(())
            }

            Step::Parallel(steps) => {
                let mut members = JoinSet::new();
                for step in steps {
                    members.spawn(run_step(Arc::clone(&registry), step));
                }

                // Let every member settle before reporting; a failed branch
                // must not corrupt or cancel its siblings.
                let mut first_failure: Option<PkgflowError> = None;
                while let Some(joined) = members.join_next().await {
                    match joined {
                        Ok(Ok(())) => {}
                        Ok(Err(err)) => {
                            warn!(error = %err, "parallel group member failed");
                            if first_failure.is_none() {
                                first_failure = Some(err);
                            }
                        }
                        Err(join_err) => {
                            warn!(error = %join_err, "parallel group member panicked");
                            if first_failure.is_none() {
                                first_failure =
                                    Some(PkgflowError::Other(anyhow!(join_err)));
                            }
                        }
                    }
                }

                match first_failure {
                    None => Ok(()),
                    Some(err) => Err(err),
                }
            }
        }
    })
}
