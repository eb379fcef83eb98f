use std::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Initialization lifecycle shared by every component. There is no way back
/// to `Uninitialized` once a component has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitState {
    Uninitialized,
    Initializing,
    Initialized,
}

impl InitState {
    pub fn is_initialized(self) -> bool {
        self == InitState::Initialized
    }

    /// State of a parent that needs every child initialized.
    pub fn compose(states: impl IntoIterator<Item = InitState>) -> InitState {
        let mut all_ready = true;
        let mut any_started = false;
        for state in states {
            match state {
                InitState::Initialized => any_started = true,
                InitState::Initializing => {
                    all_ready = false;
                    any_started = true;
                }
                InitState::Uninitialized => all_ready = false,
            }
        }
        match (all_ready, any_started) {
            (true, _) => InitState::Initialized,
            (false, true) => InitState::Initializing,
            (false, false) => InitState::Uninitialized,
        }
    }
}

/// Components that carry their own lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    CoreAgent,
    Bridge,
    Orchestrator,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::CoreAgent => "core agent",
            Component::Bridge => "device bridge",
            Component::Orchestrator => "orchestrator",
        };
        f.write_str(name)
    }
}

/// The only domain error: an operation ran before its owner finished `initialize()`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{component} not initialized")]
pub struct UninitializedError {
    pub component: Component,
}

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const INITIALIZED: u8 = 2;

/// Atomic lifecycle cell so components can be shared behind `Arc` and still
/// move through their states with `&self`.
#[derive(Debug)]
pub struct Lifecycle {
    component: Component,
    state: AtomicU8,
}

impl Lifecycle {
    pub const fn new(component: Component) -> Self {
        Self {
            component,
            state: AtomicU8::new(UNINITIALIZED),
        }
    }

    pub fn state(&self) -> InitState {
        match self.state.load(Ordering::Acquire) {
            UNINITIALIZED => InitState::Uninitialized,
            INITIALIZING => InitState::Initializing,
            _ => InitState::Initialized,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state().is_initialized()
    }

    /// Claim the `Uninitialized -> Initializing` transition.
    /// Returns `false` when another caller already claimed it.
    pub fn begin(&self) -> bool {
        self.state
            .compare_exchange(
                UNINITIALIZED,
                INITIALIZING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn complete(&self) {
        self.state.store(INITIALIZED, Ordering::Release);
    }

    /// Precondition check used by every operation.
    pub fn ensure_initialized(&self) -> Result<(), UninitializedError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(UninitializedError {
                component: self.component,
            })
        }
    }
}
