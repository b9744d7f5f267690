// src/stages/mod.rs

//! Pipeline stage definitions and task registration.
//!
//! Each stage is a thin adapter between the shared configuration and one
//! external collaborator (renderer, document converter, process invoker,
//! filesystem). The real design lives in how they compose:
//!
//! ```text
//! pkg        = clean -> (scripts || distribution) -> resources -> build -> bundle -> copy
//! pkg:signed = clean -> (scripts || distribution) -> resources -> build -> bundle -> sign
//! ```
//!
//! `scripts` and `distribution` are independent renders and run in
//! parallel; `resources` is itself a parallel group (three file classes,
//! each owning a distinct output extension) that must fully settle before
//! the packaging tool consumes its output directory. `build` must follow
//! `scripts` because the packaging tool reads the rendered scripts from
//! disk, not from memory.

pub mod clean;
pub mod distribution;
pub mod package;
pub mod resources;
pub mod scripts;

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use crate::config::PackageConfig;
use crate::convert::{DocumentConverter, PandocConverter};
use crate::errors::{PkgflowError, Result};
use crate::exec::{CommandLine, ProcessInvoker, RealProcessInvoker};
use crate::fsops::{FileOps, RealFileOps};
use crate::registry::{Step, TaskRegistry};
use crate::render::{Renderer, TeraRenderer};
use crate::types::FailurePolicy;

/// Everything a stage needs: the immutable configuration plus the external
/// collaborators, shared by reference. No stage holds a mutable alias.
pub struct StageContext {
    pub config: Arc<PackageConfig>,
    pub renderer: Arc<dyn Renderer>,
    pub converter: Arc<dyn DocumentConverter>,
    pub invoker: Arc<dyn ProcessInvoker>,
    pub fs: Arc<dyn FileOps>,
}

impl StageContext {
    /// Context wired to the production collaborators.
    pub fn new_real(config: PackageConfig) -> Self {
        Self {
            config: Arc::new(config),
            renderer: Arc::new(TeraRenderer),
            converter: Arc::new(PandocConverter),
            invoker: Arc::new(RealProcessInvoker),
            fs: Arc::new(RealFileOps),
        }
    }
}

/// Build a validated registry with the production collaborators.
pub fn build_registry(config: PackageConfig) -> Result<Arc<TaskRegistry>> {
    build_registry_with(Arc::new(StageContext::new_real(config)))
}

/// Build a validated registry from an explicit [`StageContext`].
///
/// Tests use this to substitute fake collaborators.
pub fn build_registry_with(ctx: Arc<StageContext>) -> Result<Arc<TaskRegistry>> {
    let mut registry = TaskRegistry::new(ctx.config.namespace.clone());
    register_package_tasks(&mut registry, ctx);
    registry.validate()?;
    Ok(Arc::new(registry))
}

/// Declare the full stage catalog and the two composite entry points on
/// `registry`, with every stage closing over the shared context.
pub fn register_package_tasks(registry: &mut TaskRegistry, ctx: Arc<StageContext>) {
    let ns = {
        let namespace = ctx.config.namespace.clone();
        move |suffix: &str| -> String {
            if suffix.is_empty() {
                namespace.clone()
            } else {
                format!("{namespace}:{suffix}")
            }
        }
    };

    stage(registry, &ctx, ns("resources:markdown"), resources::markdown_stage);
    stage(registry, &ctx, ns("resources:html"), resources::html_stage);
    stage(registry, &ctx, ns("resources:images"), resources::images_stage);
    stage(registry, &ctx, ns("scripts"), scripts::scripts_stage);
    stage(registry, &ctx, ns("distribution"), distribution::distribution_stage);
    stage(registry, &ctx, ns("build"), package::build_stage);
    stage(registry, &ctx, ns("bundle"), package::bundle_stage);
    stage(registry, &ctx, ns("sign"), package::sign_stage);
    stage(registry, &ctx, ns("copy"), package::copy_stage);
    stage(registry, &ctx, ns("clean"), clean::clean_stage);
    stage(registry, &ctx, ns("clean:output"), clean::clean_output_stage);

    registry.parallel(
        ns("resources"),
        [
            Step::task(ns("resources:html")),
            Step::task(ns("resources:images")),
            Step::task(ns("resources:markdown")),
        ],
    );

    let pipeline_until_bundle = || {
        [
            Step::task(ns("clean")),
            Step::parallel([Step::task(ns("scripts")), Step::task(ns("distribution"))]),
            Step::task(ns("resources")),
            Step::task(ns("build")),
            Step::task(ns("bundle")),
        ]
    };

    registry.series(
        ns(""),
        pipeline_until_bundle()
            .into_iter()
            .chain([Step::task(ns("copy"))]),
    );
    registry.series(
        ns("signed"),
        pipeline_until_bundle()
            .into_iter()
            .chain([Step::task(ns("sign"))]),
    );
}

/// Register one stage body closing over the shared context.
fn stage<F, Fut>(registry: &mut TaskRegistry, ctx: &Arc<StageContext>, name: String, body: F)
where
    F: Fn(Arc<StageContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let ctx = Arc::clone(ctx);
    registry.stage(name, move || body(Arc::clone(&ctx)));
}

/// Run an external packaging tool and apply the configured failure policy.
///
/// Nonzero exit (or a failed spawn) is logged; under the lenient policy the
/// stage is still treated as complete, preserving the historical behaviour
/// where some tools exit nonzero for warnings. Strict mode turns either
/// case into a hard stage failure.
pub(crate) async fn invoke_tool(ctx: &StageContext, tool: &str, cmd: CommandLine) -> Result<()> {
    match ctx.invoker.run(&cmd).await {
        Ok(output) if output.success() => Ok(()),
        Ok(output) => {
            warn!(
                tool,
                exit_code = output.exit_code,
                stderr = %output.stderr.trim(),
                "tool reported failure"
            );
            match ctx.config.failure_policy {
                FailurePolicy::Lenient => Ok(()),
                FailurePolicy::Strict => Err(PkgflowError::ToolFailure {
                    tool: tool.to_string(),
                    code: output.exit_code,
                }),
            }
        }
        Err(err) => {
            warn!(tool, error = %err, "failed to invoke tool");
            match ctx.config.failure_policy {
                FailurePolicy::Lenient => Ok(()),
                FailurePolicy::Strict => Err(err),
            }
        }
    }
}
