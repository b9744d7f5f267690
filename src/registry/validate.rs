// src/registry/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{PkgflowError, Result};
use crate::registry::registry::TaskRegistry;
use crate::registry::task::TaskKind;

impl TaskRegistry {
    /// Check the composed task graph before anything runs.
    ///
    /// - Every name referenced from a series/parallel step must be
    ///   registered.
    /// - The reference graph must be acyclic (a composed task reaching
    ///   itself through any chain of steps would never settle).
    pub fn validate(&self) -> Result<()> {
        validate_references(self)?;
        validate_acyclic(self)?;
        Ok(())
    }
}

fn validate_references(registry: &TaskRegistry) -> Result<()> {
    for name in registry.task_names() {
        if let Some(TaskKind::Composed(step)) = registry.get(name) {
            let mut refs = Vec::new();
            step.referenced_tasks(&mut refs);

            for referenced in refs {
                if !registry.contains(referenced) {
                    return Err(PkgflowError::TaskNotFound(format!(
                        "task '{}' references unknown task '{}'",
                        name, referenced
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_acyclic(registry: &TaskRegistry) -> Result<()> {
    // Edge direction: composed task -> referenced task.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in registry.task_names() {
        graph.add_node(name);

        if let Some(TaskKind::Composed(step)) = registry.get(name) {
            let mut refs = Vec::new();
            step.referenced_tasks(&mut refs);

            for referenced in refs {
                graph.add_edge(name, referenced, ());
            }
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(PkgflowError::GraphCycle(format!(
                "cycle detected in task composition involving task '{}'",
                node
            )))
        }
    }
}
