// src/registry/registry.rs

use std::collections::HashMap;
use std::future::Future;

use tracing::debug;

use crate::errors::Result;
use crate::registry::task::{StageFuture, Step, TaskKind, TaskName};

/// Holds the fixed set of named tasks declared at registration time.
///
/// The registry is write-once-then-run: the stage definitions populate it,
/// [`TaskRegistry::validate`] checks the composed graph, and from then on it
/// is only read (the runner shares it behind an `Arc`).
#[derive(Debug)]
pub struct TaskRegistry {
    namespace: String,
    tasks: HashMap<TaskName, TaskKind>,
}

impl TaskRegistry {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            tasks: HashMap::new(),
        }
    }

    /// The stage-name prefix this registry was built with. The bare
    /// namespace is also the default entry point task name.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register a leaf stage under `name`.
    ///
    /// `f` is called once per invocation of the task, so entry points that
    /// include this stage can run repeatedly. Registering an existing name
    /// replaces it (last registration wins).
    pub fn stage<F, Fut>(&mut self, name: impl Into<TaskName>, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let name = name.into();
        debug!(task = %name, "registering stage");
        self.tasks.insert(
            name,
            TaskKind::Stage(Box::new(move || Box::pin(f()) as StageFuture)),
        );
    }

    /// Register a sequential pipeline under `name`.
    pub fn series(&mut self, name: impl Into<TaskName>, steps: impl IntoIterator<Item = Step>) {
        let name = name.into();
        debug!(task = %name, "registering series");
        self.tasks
            .insert(name, TaskKind::Composed(Step::series(steps)));
    }

    /// Register a parallel group under `name`.
    pub fn parallel(&mut self, name: impl Into<TaskName>, steps: impl IntoIterator<Item = Step>) {
        let name = name.into();
        debug!(task = %name, "registering parallel group");
        self.tasks
            .insert(name, TaskKind::Composed(Step::parallel(steps)));
    }

    /// Look up a registered task.
    pub fn get(&self, name: &str) -> Option<&TaskKind> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// All registered task names, sorted for stable listings.
    pub fn task_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}
