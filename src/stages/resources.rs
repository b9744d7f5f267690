// src/stages/resources.rs

//! Resource conversion stages.
//!
//! The three stages here form the `resources` parallel group. They are safe
//! to run concurrently because each owns a distinct file class and a
//! distinct output extension under `temp/resources` — see
//! [`output_path_for`], which is the single mapping all three share.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::Result;
use crate::stages::StageContext;

/// Destination under `dest_dir` for one resource source file, or `None` for
/// file classes the resource stages do not process.
///
/// Markdown is the only class that changes extension (it leaves the
/// pipeline as rich text); html and png keep their names. Because the three
/// classes map to three disjoint output extensions, distinct inputs can
/// never contend for the same output path across the parallel group.
pub fn output_path_for(dest_dir: &Path, source: &Path) -> Option<PathBuf> {
    let ext = source.extension()?.to_str()?;
    let name = source.file_name()?;

    match ext {
        "md" => {
            let stem = source.file_stem()?;
            let mut converted = stem.to_os_string();
            converted.push(".rtf");
            Some(dest_dir.join(converted))
        }
        "html" | "png" => Some(dest_dir.join(name)),
        _ => None,
    }
}

/// Render every `*.md` resource and convert it to rich text.
///
/// Rendered markdown is staged under `temp/render` before conversion; only
/// the converted `.rtf` lands in `temp/resources`.
pub(crate) async fn markdown_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;
    let sources = ctx.fs.list_matching(&cfg.resources_path, "*.md")?;

    if sources.is_empty() {
        debug!(path = ?cfg.resources_path, "no markdown resources to convert");
        return Ok(());
    }

    let context = cfg.template_context();
    let pandoc_args = ["--standalone".to_string()];

    for source in sources {
        let Some(dest) = output_path_for(&cfg.resources_tmp(), &source) else {
            continue;
        };
        let Some(name) = source.file_name() else { continue };

        let template = ctx.fs.read_to_string(&source)?;
        let rendered = ctx.renderer.render(&template, &context)?;

        let staged = cfg.render_tmp().join(name);
        ctx.fs.write(&staged, rendered.as_bytes())?;

        let converted = ctx
            .converter
            .convert(&staged, "markdown", "rtf", &pandoc_args)
            .await?;

        ctx.fs.write(&dest, &converted)?;

        debug!(source = ?source, dest = ?dest, "converted markdown resource");
    }

    Ok(())
}

/// Render every `*.html` resource into `temp/resources`.
pub(crate) async fn html_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;
    let sources = ctx.fs.list_matching(&cfg.resources_path, "*.html")?;

    if sources.is_empty() {
        debug!(path = ?cfg.resources_path, "no html resources to render");
        return Ok(());
    }

    let context = cfg.template_context();

    for source in sources {
        let Some(dest) = output_path_for(&cfg.resources_tmp(), &source) else {
            continue;
        };

        let template = ctx.fs.read_to_string(&source)?;
        let rendered = ctx.renderer.render(&template, &context)?;

        ctx.fs.write(&dest, rendered.as_bytes())?;

        debug!(source = ?source, dest = ?dest, "rendered html resource");
    }

    Ok(())
}

/// Copy every `*.png` resource into `temp/resources` verbatim.
pub(crate) async fn images_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;
    let copied = ctx
        .fs
        .copy_matching(&cfg.resources_path, "*.png", &cfg.resources_tmp())?;

    info!(count = copied.len(), "copied image resources");
    Ok(())
}
