//! Device bridge implementations. Only a deterministic stub exists today; it
//! validates lifecycle preconditions and echoes every request back.

pub mod permissions;
pub mod registry;
pub mod stub;

pub use stub::StubBridge;
