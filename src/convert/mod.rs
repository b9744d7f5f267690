// src/convert/mod.rs

//! Document conversion seam (markdown -> rich text).
//!
//! The production implementation shells out to `pandoc`. Unlike the
//! packaging tools, a failed conversion is a hard error: there is no output
//! to carry forward, so the lenient failure policy does not apply here.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tracing::debug;

use crate::errors::{PkgflowError, Result};

/// Converts a document on disk from one format to another, returning the
/// converted bytes.
pub trait DocumentConverter: Send + Sync {
    fn convert<'a>(
        &'a self,
        input: &'a Path,
        from: &'a str,
        to: &'a str,
        extra_args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}

/// Real converter that invokes `pandoc` and captures its stdout.
#[derive(Debug, Clone, Default)]
pub struct PandocConverter;

impl DocumentConverter for PandocConverter {
    fn convert<'a>(
        &'a self,
        input: &'a Path,
        from: &'a str,
        to: &'a str,
        extra_args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            debug!(input = ?input, from, to, "converting document via pandoc");

            let output = tokio::process::Command::new("pandoc")
                .arg(input)
                .arg("--from")
                .arg(from)
                .arg("--to")
                .arg(to)
                .args(extra_args)
                .arg("--output")
                .arg("-")
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .with_context(|| format!("invoking pandoc for {:?}", input))?;

            if !output.status.success() {
                let code = output.status.code().unwrap_or(-1);
                let stderr = String::from_utf8_lossy(&output.stderr);
                debug!(input = ?input, exit_code = code, "pandoc stderr: {}", stderr);
                return Err(PkgflowError::ToolFailure {
                    tool: "pandoc".to_string(),
                    code,
                });
            }

            Ok(output.stdout)
        })
    }
}
