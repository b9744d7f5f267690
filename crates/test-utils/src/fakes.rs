use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use pkgflow::convert::DocumentConverter;
use pkgflow::errors::Result;
use pkgflow::exec::{CommandLine, ProcessInvoker, ProcessOutput};

/// A fake process invoker that:
/// - records every command line it is asked to run
/// - optionally calls a hook before recording (for at-invocation-time
///   assertions, e.g. "the rendered scripts already exist on disk")
/// - fabricates the output artifact for the packaging tools, so pipelines
///   complete without any real tool installed
/// - reports a configurable exit code.
pub struct RecordingInvoker {
    commands: Arc<Mutex<Vec<CommandLine>>>,
    exit_code: i32,
    fabricate_artifacts: bool,
    on_invoke: Option<Box<dyn Fn(&CommandLine) + Send + Sync>>,
}

/// Tools whose final positional argument is the output artifact.
const PACKAGING_TOOLS: &[&str] = &["pkgbuild", "productbuild", "productsign"];

/// Deterministic stub contents, so repeated pipeline runs produce
/// byte-identical artifacts.
pub const STUB_ARTIFACT: &[u8] = b"fake-package-artifact\n";

impl RecordingInvoker {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            exit_code: 0,
            fabricate_artifacts: true,
            on_invoke: None,
        }
    }

    /// Report this exit code from every invocation. A nonzero code also
    /// stops artifact fabrication, mimicking a tool that failed before
    /// writing its output.
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn without_artifacts(mut self) -> Self {
        self.fabricate_artifacts = false;
        self
    }

    pub fn with_hook(mut self, hook: impl Fn(&CommandLine) + Send + Sync + 'static) -> Self {
        self.on_invoke = Some(Box::new(hook));
        self
    }

    /// Handle onto the recorded command list, valid after the invoker has
    /// been moved into a stage context.
    pub fn recorded(&self) -> Arc<Mutex<Vec<CommandLine>>> {
        Arc::clone(&self.commands)
    }
}

impl Default for RecordingInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessInvoker for RecordingInvoker {
    fn run<'a>(
        &'a self,
        cmd: &'a CommandLine,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + 'a>> {
        Box::pin(async move {
            if let Some(hook) = &self.on_invoke {
                hook(cmd);
            }

            self.commands.lock().unwrap().push(cmd.clone());

            if self.fabricate_artifacts
                && self.exit_code == 0
                && PACKAGING_TOOLS.contains(&cmd.program())
            {
                if let Some(last) = cmd.last_arg() {
                    let artifact = PathBuf::from(last);
                    if let Some(parent) = artifact.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&artifact, STUB_ARTIFACT)?;
                }
            }

            let stderr = if self.exit_code == 0 {
                String::new()
            } else {
                format!("{}: simulated failure", cmd.program())
            };

            Ok(ProcessOutput {
                exit_code: self.exit_code,
                stderr,
            })
        })
    }
}

/// A fake document converter that wraps the rendered input in a marker
/// instead of shelling out. Deterministic for idempotence assertions.
#[derive(Debug, Clone, Default)]
pub struct FakeConverter;

impl DocumentConverter for FakeConverter {
    fn convert<'a>(
        &'a self,
        input: &'a Path,
        from: &'a str,
        to: &'a str,
        _extra_args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let text = std::fs::read_to_string(input)?;
            Ok(format!("{{\\rtf1 [{from}->{to}] {text}}}").into_bytes())
        })
    }
}
