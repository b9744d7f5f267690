// src/registry/mod.rs

//! Named task registration and execution.
//!
//! - [`task`] defines the task types: a leaf [`task::TaskKind::Stage`] is a
//!   re-invokable boxed async fn; a [`task::TaskKind::Composed`] task is a
//!   [`task::Step`] tree of series/parallel references to other tasks.
//! - [`registry`] holds the name → task map and the registration API.
//! - [`validate`] checks composed references (unknown names, cycles) with a
//!   petgraph toposort before anything runs.
//! - [`runner`] executes a named task: series steps run strictly in order,
//!   parallel steps fan out on a `JoinSet` and the group only settles once
//!   every member has.

pub mod registry;
pub mod runner;
pub mod task;
pub mod validate;

pub use registry::TaskRegistry;
pub use runner::Runner;
pub use task::{Step, TaskKind, TaskName};
