// src/stages/distribution.rs

//! Distribution manifest rendering.

use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::stages::StageContext;

/// Bundled fallback manifest template, used when the config does not point
/// at its own.
const DEFAULT_DISTRIBUTION_TEMPLATE: &str =
    include_str!("../assets/distribution.xml.tera");

/// Render the distribution manifest into `temp/distribution.xml`.
pub(crate) async fn distribution_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;

    let template = match &cfg.distribution_template {
        Some(path) => ctx.fs.read_to_string(path)?,
        None => DEFAULT_DISTRIBUTION_TEMPLATE.to_string(),
    };

    let rendered = ctx.renderer.render(&template, &cfg.template_context())?;

    let dest = cfg.distribution_manifest();
    ctx.fs.write(&dest, rendered.as_bytes())?;

    info!(dest = ?dest, "distribution manifest rendered");
    Ok(())
}
