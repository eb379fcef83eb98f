//! Core abstractions for OpenALaw: lifecycle, routing rules, and the agent,
//! bridge and queue contracts the concrete crates implement.
//! Kept free of runtime dependencies so fakes can be swapped in anywhere.

pub mod agent;
pub mod bridge;
pub mod config;
pub mod lifecycle;
pub mod status;
pub mod tasks;
