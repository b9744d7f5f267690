// src/exec/mod.rs

//! Process invocation layer.
//!
//! The packaging pipeline drives three external tools (a packaging tool, a
//! bundling tool, a signing tool). This module is how it reaches them:
//!
//! - [`command`] holds the structured [`CommandLine`] builder. Commands are
//!   argv lists, never interpolated shell strings, so paths with spaces and
//!   shell metacharacters cannot change the command's meaning.
//! - [`invoker`] defines the [`ProcessInvoker`] trait plus the production
//!   implementation on `tokio::process`. Tests substitute a recording fake.

pub mod command;
pub mod invoker;

pub use command::CommandLine;
pub use invoker::{ProcessInvoker, ProcessOutput, RealProcessInvoker};
