//! Core agent: execution-target routing, the task queue, and the placeholder
//! API and local-model bridges it owns once initialized.

pub mod agent;
pub mod api;
pub mod ollama;

pub use agent::CoreAgent;
