// src/stages/scripts.rs

//! Install-script rendering.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::Result;
use crate::stages::StageContext;

/// Render every file in `scripts_path` into `temp/scripts`.
///
/// The packaging tool reads this directory from disk, so this stage must
/// have settled before the `build` stage starts; the entry-point series
/// encodes that ordering. Permission bits are propagated so pre/post-install
/// scripts keep their executable bit through the render.
pub(crate) async fn scripts_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;
    let sources = ctx.fs.list_matching(&cfg.scripts_path, "*")?;

    if sources.is_empty() {
        debug!(path = ?cfg.scripts_path, "no install scripts to render");
        return Ok(());
    }

    let context = cfg.template_context();
    let dest_dir = cfg.scripts_tmp();

    for source in sources {
        let Some(name) = source.file_name() else { continue };

        let template = ctx.fs.read_to_string(&source)?;
        let rendered = ctx.renderer.render(&template, &context)?;

        let dest = dest_dir.join(name);

        ctx.fs.write(&dest, rendered.as_bytes())?;
        ctx.fs.copy_permissions(&source, &dest)?;

        debug!(source = ?source, dest = ?dest, "rendered install script");
    }

    info!(path = ?dest_dir, "install scripts rendered");
    Ok(())
}
