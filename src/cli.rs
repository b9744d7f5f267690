// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pkgflow`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pkgflow",
    version,
    about = "Assemble a distributable installer package from a declared task pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run.
    ///
    /// Defaults to the namespace root entry point (e.g. "pkg" builds the
    /// unsigned package; "pkg:signed" builds and signs).
    #[arg(value_name = "TASK")]
    pub task: Option<String>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Pkgflow.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Pkgflow.toml")]
    pub config: String,

    /// Fail the pipeline when an external packaging tool exits nonzero,
    /// overriding `failure_policy` from the config file.
    #[arg(long)]
    pub strict: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PKGFLOW_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the registered tasks, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
