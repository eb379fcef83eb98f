use std::collections::BTreeMap;

use openalaw_core::bridge::{BridgeOperation, InterfaceKind};
use tracing::debug;

/// Interfaces published by an initialized bridge, each with its operations.
/// Built once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceRegistry {
    interfaces: BTreeMap<InterfaceKind, Vec<BridgeOperation>>,
}

impl InterfaceRegistry {
    /// Register the display, input and accessibility interfaces.
    pub fn standard() -> Self {
        let mut interfaces = BTreeMap::new();
        for kind in InterfaceKind::ALL {
            debug!(interface = %kind, "registering interface");
            interfaces.insert(kind, kind.operations().to_vec());
        }
        Self { interfaces }
    }

    /// Interface names in registration order.
    pub fn kinds(&self) -> Vec<InterfaceKind> {
        InterfaceKind::ALL
            .into_iter()
            .filter(|kind| self.interfaces.contains_key(kind))
            .collect()
    }
}
