// src/registry/task.rs

//! Task types for the registry.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// Canonical task name type used throughout the registry.
pub type TaskName = String;

/// Future produced by invoking a stage function.
pub type StageFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

/// A registered stage body.
///
/// Stored as a factory rather than a future so the same task can be run
/// repeatedly (entry points are re-invokable).
pub type StageFn = Box<dyn Fn() -> StageFuture + Send + Sync + 'static>;

/// One element of a composed task.
///
/// Composition is by *name*: a `Step::Task` refers to another registered
/// task, so groups and pipelines nest without the referenced task knowing
/// how it is composed.
#[derive(Debug, Clone)]
pub enum Step {
    /// Run the named task.
    Task(TaskName),
    /// Run each step in order; a failure aborts the remainder.
    Series(Vec<Step>),
    /// Run all steps concurrently; the group settles once every member has,
    /// and fails if any member failed.
    Parallel(Vec<Step>),
}

impl Step {
    pub fn task(name: impl Into<TaskName>) -> Self {
        Step::Task(name.into())
    }

    pub fn series(steps: impl IntoIterator<Item = Step>) -> Self {
        Step::Series(steps.into_iter().collect())
    }

    pub fn parallel(steps: impl IntoIterator<Item = Step>) -> Self {
        Step::Parallel(steps.into_iter().collect())
    }

    /// Collect every task name referenced anywhere in this step tree.
    pub fn referenced_tasks<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Step::Task(name) => out.push(name.as_str()),
            Step::Series(steps) | Step::Parallel(steps) => {
                for step in steps {
                    step.referenced_tasks(out);
                }
            }
        }
    }
}

/// What a registered name resolves to.
pub enum TaskKind {
    /// A leaf unit of work.
    Stage(StageFn),
    /// A series/parallel composition over other registered tasks.
    Composed(Step),
}

impl fmt::Debug for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Stage(_) => f.write_str("Stage(..)"),
            TaskKind::Composed(step) => f.debug_tuple("Composed").field(step).finish(),
        }
    }
}
