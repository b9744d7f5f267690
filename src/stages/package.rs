// src/stages/package.rs

//! Packaging-tool stages: build, bundle, sign, copy.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{PkgflowError, Result};
use crate::exec::CommandLine;
use crate::stages::{StageContext, invoke_tool};

/// Invoke the packaging tool against the source tree and the rendered
/// scripts, producing the intermediate package under `temp/packages`.
pub(crate) async fn build_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;

    // The tool refuses to run against missing directories.
    ctx.fs.create_dir_all(&cfg.packages_tmp())?;
    ctx.fs.create_dir_all(&cfg.scripts_tmp())?;

    let cmd = CommandLine::new("pkgbuild")
        .flag("--root", &cfg.source_path)
        .flag("--scripts", cfg.scripts_tmp())
        .flag("--identifier", &cfg.id)
        .flag("--version", &cfg.version)
        .flag("--install-location", &cfg.install_path)
        .arg(cfg.intermediate_package());

    invoke_tool(&ctx, "pkgbuild", cmd).await
}

/// Invoke the bundling tool against the manifest, rendered resources and
/// intermediate packages, producing the unsigned package under `temp`.
pub(crate) async fn bundle_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;

    let cmd = CommandLine::new("productbuild")
        .flag("--distribution", cfg.distribution_manifest())
        .flag("--resources", cfg.resources_tmp())
        .flag("--package-path", cfg.packages_tmp())
        .arg(cfg.bundled_package());

    invoke_tool(&ctx, "productbuild", cmd).await
}

/// Sign the bundled package into `output`.
///
/// Requires a `[signing]` section; unlocks the configured keychain first
/// when one is set.
pub(crate) async fn sign_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;

    let signing = cfg.signing.as_ref().ok_or_else(|| {
        PkgflowError::ConfigError(
            "signing requested but no [signing] section is configured".to_string(),
        )
    })?;

    ctx.fs.create_dir_all(&cfg.output_path)?;

    if let Some(keychain) = &signing.keychain {
        let unlock = CommandLine::new("security")
            .arg("unlock-keychain")
            .arg(keychain);
        invoke_tool(&ctx, "security", unlock).await?;
    }

    let mut cmd = CommandLine::new("productsign").flag("--sign", &signing.identity);
    if let Some(keychain) = &signing.keychain {
        cmd = cmd.flag("--keychain", keychain);
    }
    let cmd = cmd.arg(cfg.bundled_package()).arg(cfg.final_package());

    invoke_tool(&ctx, "productsign", cmd).await
}

/// Copy the unsigned bundled package into `output` verbatim.
///
/// A missing bundled package is a zero-match copy, not an error: under the
/// lenient failure policy an upstream tool may have failed without
/// producing it, and this stage keeps the pipeline's settle-through
/// behaviour instead of turning that into a hard failure here.
pub(crate) async fn copy_stage(ctx: Arc<StageContext>) -> Result<()> {
    let cfg = &ctx.config;

    let src = cfg.bundled_package();
    if !ctx.fs.exists(&src) {
        warn!(src = ?src, "bundled package missing; nothing to copy");
        return Ok(());
    }

    let dest = cfg.final_package();
    ctx.fs.copy_file(&src, &dest)?;

    info!(artifact = ?dest, "package copied to output");
    Ok(())
}
