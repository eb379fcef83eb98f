use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agent::RoutingRules;

pub const ARCHITECTURE: &str = "ARM";
pub const PLATFORM: &str = "Android";
pub const DEFAULT_AGENT_ID: &str = "AgentBot11";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration handed to the core agent at construction.
///
/// Only routing rules are interpreted. Identity fields are overwritten by
/// [`AgentConfig::resolved`]; everything in `extra` passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_id")]
    pub agent_id: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_architecture")]
    pub architecture: String,
    #[serde(default)]
    pub routing: RoutingRules,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: default_agent_id(),
            platform: default_platform(),
            architecture: default_architecture(),
            routing: RoutingRules::default(),
            extra: BTreeMap::new(),
        }
    }
}

impl AgentConfig {
    /// Merge the agent's identity over the supplied config. The agent id is
    /// kept when the caller set one; platform and architecture are fixed.
    pub fn resolved(mut self) -> Self {
        self.platform = PLATFORM.to_string();
        self.architecture = ARCHITECTURE.to_string();
        if self.agent_id.trim().is_empty() {
            self.agent_id = default_agent_id();
        }
        self
    }
}

fn default_agent_id() -> String {
    DEFAULT_AGENT_ID.to_string()
}

fn default_platform() -> String {
    PLATFORM.to_string()
}

fn default_architecture() -> String {
    ARCHITECTURE.to_string()
}
