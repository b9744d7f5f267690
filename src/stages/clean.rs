// src/stages/clean.rs

//! Workspace cleanup stages.

use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::stages::StageContext;

/// Delete the temp workspace. Runs first in every entry point; a missing
/// tree is success.
pub(crate) async fn clean_stage(ctx: Arc<StageContext>) -> Result<()> {
    let path = &ctx.config.temp_path;
    ctx.fs.delete_tree(path)?;
    info!(path = ?path, "temp workspace cleaned");
    Ok(())
}

/// Delete the output directory. Not part of the main pipeline; exists as an
/// explicit utility (test teardown, release hygiene).
pub(crate) async fn clean_output_stage(ctx: Arc<StageContext>) -> Result<()> {
    let path = &ctx.config.output_path;
    ctx.fs.delete_tree(path)?;
    info!(path = ?path, "output directory cleaned");
    Ok(())
}
