use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    bridge::{InterfaceKind, PermissionSet},
    lifecycle::InitState,
};

/// Core agent snapshot, recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreStatus {
    pub version: String,
    pub architecture: String,
    pub platform: String,
    pub agent_id: String,
    pub initialized: bool,
    pub timestamp: DateTime<Utc>,
}

/// Device bridge snapshot, recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStatus {
    pub initialized: bool,
    pub permissions: PermissionSet,
    /// Registered interfaces; empty until the bridge is initialized.
    pub interfaces: Vec<InterfaceKind>,
    pub architecture: String,
    pub platform: String,
    pub timestamp: DateTime<Utc>,
}

/// Combined snapshot of the orchestrator and both collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub architecture: String,
    pub platform: String,
    pub agent_id: String,
    pub state: InitState,
    pub core: CoreStatus,
    pub bridge: BridgeStatus,
    pub timestamp: DateTime<Utc>,
}
