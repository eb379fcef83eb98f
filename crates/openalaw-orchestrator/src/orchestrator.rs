use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use openalaw_core::{
    agent::TaskAgent,
    bridge::{CaptureOptions, DeviceBridge, Point, ScreenCapture, TouchResult},
    config::{ARCHITECTURE, PLATFORM, VERSION},
    lifecycle::{Component, InitState, UninitializedError},
    status::SystemStatus,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    coordinates::extract_coordinates,
    detect::{SystemIntent, SystemRules},
};

pub const NOT_IMPLEMENTED_REASON: &str = "System task not implemented yet";

/// Result of the device side of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SystemOutcome {
    Capture(ScreenCapture),
    Touch(TouchResult),
    NotImplemented { success: bool, reason: String },
}

impl SystemOutcome {
    pub fn not_implemented() -> Self {
        SystemOutcome::NotImplemented {
            success: false,
            reason: NOT_IMPLEMENTED_REASON.to_string(),
        }
    }

    pub fn succeeded(&self) -> bool {
        match self {
            SystemOutcome::Capture(capture) => capture.success,
            SystemOutcome::Touch(touch) => touch.success,
            SystemOutcome::NotImplemented { success, .. } => *success,
        }
    }
}

/// What `process_task` hands back: the agent's answer alone, or combined with
/// the device outcome when the task needed the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskOutcome {
    Core(String),
    Combined {
        core: String,
        system: SystemOutcome,
        combined: bool,
    },
}

impl TaskOutcome {
    pub fn core(&self) -> &str {
        match self {
            TaskOutcome::Core(core) | TaskOutcome::Combined { core, .. } => core,
        }
    }

    pub fn system(&self) -> Option<&SystemOutcome> {
        match self {
            TaskOutcome::Core(_) => None,
            TaskOutcome::Combined { system, .. } => Some(system),
        }
    }
}

/// Composes an injected task agent and device bridge.
///
/// Collaborators may arrive already initialized; the orchestrator is
/// initialized exactly when both of them are.
pub struct Orchestrator {
    agent: Arc<dyn TaskAgent>,
    bridge: Arc<dyn DeviceBridge>,
    rules: SystemRules,
}

impl Orchestrator {
    pub fn new(agent: Arc<dyn TaskAgent>, bridge: Arc<dyn DeviceBridge>) -> Self {
        info!("orchestrator v{VERSION} created for {ARCHITECTURE}");
        Self {
            agent,
            bridge,
            rules: SystemRules::default(),
        }
    }

    /// Replace the device-interaction keyword rules.
    pub fn with_rules(mut self, rules: SystemRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn agent(&self) -> &Arc<dyn TaskAgent> {
        &self.agent
    }

    /// Initialize both collaborators (no-op for those already initialized)
    /// and log a status report.
    #[instrument(skip_all)]
    pub async fn initialize(&self) -> Result<()> {
        info!("initializing orchestrator");
        self.agent.initialize().await?;
        self.bridge.initialize().await?;
        info!("orchestrator fully initialized");
        self.report_status();
        Ok(())
    }

    pub fn state(&self) -> InitState {
        InitState::compose([self.agent.state(), self.bridge.state()])
    }

    fn ensure_ready(&self) -> Result<(), UninitializedError> {
        if self.state().is_initialized() {
            Ok(())
        } else {
            Err(UninitializedError {
                component: Component::Orchestrator,
            })
        }
    }

    /// Run a task through the agent, then through the bridge if it mentions
    /// the device. Both checks always run.
    #[instrument(skip_all)]
    pub async fn process_task(&self, task: &str) -> Result<TaskOutcome, UninitializedError> {
        self.ensure_ready()?;
        info!("processing task: {task}");

        let core = self.agent.process_task(task).await?;
        if !self.requires_system_interaction(task) {
            return Ok(TaskOutcome::Core(core));
        }

        info!("task requires device interaction");
        let system = self.handle_system_task(task).await?;
        Ok(TaskOutcome::Combined {
            core,
            system,
            combined: true,
        })
    }

    pub fn requires_system_interaction(&self, task: &str) -> bool {
        self.rules.requires_system_interaction(task)
    }

    pub fn extract_coordinates(&self, task: &str) -> Option<Point> {
        extract_coordinates(task)
    }

    /// Map a device task onto a bridge call. Unsupported tasks, and touch
    /// tasks without coordinates, come back as a not-implemented outcome.
    #[instrument(skip_all)]
    pub async fn handle_system_task(
        &self,
        task: &str,
    ) -> Result<SystemOutcome, UninitializedError> {
        self.ensure_ready()?;
        debug!("handling system task: {task}");

        match self.rules.intent(task) {
            SystemIntent::Capture => {
                let capture = self
                    .bridge
                    .capture_screen(CaptureOptions::default())
                    .await?;
                Ok(SystemOutcome::Capture(capture))
            }
            SystemIntent::Touch => match self.extract_coordinates(task) {
                Some(at) => Ok(SystemOutcome::Touch(self.bridge.tap(at).await?)),
                None => {
                    debug!("no coordinates found in touch task");
                    Ok(SystemOutcome::not_implemented())
                }
            },
            SystemIntent::Unsupported => Ok(SystemOutcome::not_implemented()),
        }
    }

    /// Fresh combined snapshot.
    pub fn status(&self) -> SystemStatus {
        let core = self.agent.status();
        SystemStatus {
            version: VERSION.to_string(),
            architecture: ARCHITECTURE.to_string(),
            platform: PLATFORM.to_string(),
            agent_id: core.agent_id.clone(),
            state: self.state(),
            core,
            bridge: self.bridge.status(),
            timestamp: Utc::now(),
        }
    }

    /// Log a human-readable status block.
    pub fn report_status(&self) {
        let status = self.status();
        info!("=== OpenALaw system status ===");
        info!("version: {}", status.version);
        info!("architecture: {}", status.architecture);
        info!("platform: {}", status.platform);
        info!("agent id: {}", status.agent_id);
        info!("core initialized: {}", status.core.initialized);
        info!("bridge initialized: {}", status.bridge.initialized);
        info!("timestamp: {}", status.timestamp.to_rfc3339());
    }
}
