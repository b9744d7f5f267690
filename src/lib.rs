// src/lib.rs

pub mod cli;
pub mod config;
pub mod convert;
pub mod errors;
pub mod exec;
pub mod fsops;
pub mod logging;
pub mod registry;
pub mod render;
pub mod stages;
pub mod types;

use std::path::PathBuf;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::errors::Result;
use crate::registry::{Runner, Step, TaskKind, TaskRegistry};
use crate::types::FailurePolicy;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + resolution
/// - registry construction (stage catalog + entry points)
/// - graph validation
/// - execution of the requested task
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let mut cfg = load_and_validate(&config_path)?;

    if args.strict {
        cfg.failure_policy = FailurePolicy::Strict;
    }

    let registry = stages::build_registry(cfg)?;

    if args.dry_run {
        print_dry_run(&registry);
        return Ok(());
    }

    // Default entry point is the bare namespace (the unsigned pipeline).
    let task = args
        .task
        .unwrap_or_else(|| registry.namespace().to_string());

    info!(task = %task, "running task");
    Runner::new(registry).run(&task).await
}

/// Simple dry-run output: print tasks and their composition.
fn print_dry_run(registry: &TaskRegistry) {
    let names = registry.task_names();

    println!("pkgflow dry-run");
    println!("tasks ({}):", names.len());

    for name in names {
        match registry.get(name) {
            Some(TaskKind::Stage(_)) => println!("  - {name}"),
            Some(TaskKind::Composed(step)) => println!("  - {name} = {}", format_step(step)),
            None => {}
        }
    }
}

fn format_step(step: &Step) -> String {
    match step {
        Step::Task(name) => name.clone(),
        Step::Series(steps) => steps
            .iter()
            .map(format_step)
            .collect::<Vec<_>>()
            .join(" -> "),
        Step::Parallel(steps) => format!(
            "({})",
            steps
                .iter()
                .map(format_step)
                .collect::<Vec<_>>()
                .join(" || ")
        ),
    }
}
