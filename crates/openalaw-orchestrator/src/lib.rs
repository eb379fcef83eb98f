//! Top-level orchestration: runs every task through the core agent and, when
//! the task talks about the device, through the bridge as well.

pub mod coordinates;
pub mod detect;
pub mod orchestrator;

pub use orchestrator::{Orchestrator, SystemOutcome, TaskOutcome};
