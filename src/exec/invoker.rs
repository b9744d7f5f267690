// src/exec/invoker.rs

//! Individual external-tool process invocation.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::command::CommandLine;

/// What the pipeline observes from a finished tool process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait abstracting how external tool command lines are executed.
///
/// Production code uses [`RealProcessInvoker`]; tests provide a fake that
/// records the argv and fabricates outputs without spawning processes.
pub trait ProcessInvoker: Send + Sync {
    fn run<'a>(
        &'a self,
        cmd: &'a CommandLine,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + 'a>>;
}

/// Real invoker used in production.
#[derive(Debug, Clone, Default)]
pub struct RealProcessInvoker;

impl ProcessInvoker for RealProcessInvoker {
    fn run<'a>(
        &'a self,
        cmd: &'a CommandLine,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + 'a>> {
        Box::pin(async move {
            info!(cmd = %cmd, "invoking external tool");

            let output = tokio::process::Command::new(cmd.program())
                .args(cmd.args())
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .with_context(|| format!("spawning process for '{}'", cmd.program()))?;

            let exit_code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

            for line in stderr.lines() {
                debug!(tool = cmd.program(), "stderr: {}", line);
            }
            debug!(
                tool = cmd.program(),
                exit_code,
                success = output.status.success(),
                "tool process exited"
            );

            Ok(ProcessOutput { exit_code, stderr })
        })
    }
}
