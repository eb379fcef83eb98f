use std::sync::OnceLock;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use openalaw_core::{
    agent::{format_processed, ExecutionTarget, TaskAgent},
    config::{AgentConfig, ARCHITECTURE, PLATFORM, VERSION},
    lifecycle::{Component, InitState, Lifecycle, UninitializedError},
    status::CoreStatus,
    tasks::TaskQueue,
};
use openalaw_task::TaskScheduler;
use tracing::{debug, info, instrument};

use crate::{api::ApiBridge, ollama::OllamaBridge};

/// Components built by `initialize`.
struct Runtime {
    scheduler: TaskScheduler,
    api: ApiBridge,
    ollama: OllamaBridge,
}

/// Keyword-routing core agent.
///
/// Classification works at any time; everything that touches the scheduler or
/// the bridges needs `initialize` to have completed.
pub struct CoreAgent {
    config: AgentConfig,
    lifecycle: Lifecycle,
    runtime: OnceLock<Runtime>,
}

impl CoreAgent {
    /// The agent identity is merged into `config` here, so status and routing
    /// see the resolved values from the start.
    pub fn new(config: AgentConfig) -> Self {
        info!("core agent created - v{VERSION} ({ARCHITECTURE})");
        Self {
            config: config.resolved(),
            lifecycle: Lifecycle::new(Component::CoreAgent),
            runtime: OnceLock::new(),
        }
    }

    /// Configuration after the agent identity has been merged in.
    pub fn resolved_config(&self) -> Result<&AgentConfig, UninitializedError> {
        self.runtime().map(|_| &self.config)
    }

    pub fn api(&self) -> Result<&ApiBridge, UninitializedError> {
        self.runtime().map(|rt| &rt.api)
    }

    pub fn ollama(&self) -> Result<&OllamaBridge, UninitializedError> {
        self.runtime().map(|rt| &rt.ollama)
    }

    fn runtime(&self) -> Result<&Runtime, UninitializedError> {
        self.lifecycle.ensure_initialized()?;
        self.runtime.get().ok_or(UninitializedError {
            component: Component::CoreAgent,
        })
    }

    fn execute_locally(&self, task: &str) -> String {
        debug!("executing task locally: {task}");
        format_processed(ExecutionTarget::Local, task)
    }

    fn execute_remotely(&self, task: &str) -> String {
        debug!("executing task remotely: {task}");
        format_processed(ExecutionTarget::Remote, task)
    }
}

impl Default for CoreAgent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

#[async_trait]
impl TaskAgent for CoreAgent {
    fn name(&self) -> &'static str {
        "core"
    }

    #[instrument(skip_all, fields(agent = "core"))]
    async fn initialize(&self) -> Result<()> {
        if self.lifecycle.is_initialized() {
            debug!("core agent already initialized");
            return Ok(());
        }
        self.lifecycle.begin();
        // Concurrent callers block here until the first one has built the runtime.
        self.runtime.get_or_init(|| {
            info!("initializing core agent");
            debug!(agent_id = %self.config.agent_id, "configuration loaded");
            Runtime {
                scheduler: TaskScheduler::new(),
                api: ApiBridge::new(),
                ollama: OllamaBridge::new(),
            }
        });
        self.lifecycle.complete();
        info!("core agent initialized");
        Ok(())
    }

    fn state(&self) -> InitState {
        self.lifecycle.state()
    }

    fn classify(&self, task: &str) -> ExecutionTarget {
        self.config.routing.classify(task)
    }

    #[instrument(skip_all, fields(agent = "core"))]
    async fn process_task(&self, task: &str) -> Result<String, UninitializedError> {
        self.lifecycle.ensure_initialized()?;
        info!("processing task: {task}");

        let target = self.classify(task);
        info!(%target, "routing task");
        Ok(match target {
            ExecutionTarget::Local => self.execute_locally(task),
            ExecutionTarget::Remote => self.execute_remotely(task),
        })
    }

    async fn enqueue(&self, task: String) -> Result<(), UninitializedError> {
        self.runtime()?.scheduler.add_task(task).await;
        Ok(())
    }

    async fn process_queue(&self) -> Result<usize, UninitializedError> {
        Ok(self.runtime()?.scheduler.process_queue().await)
    }

    fn status(&self) -> CoreStatus {
        CoreStatus {
            version: VERSION.to_string(),
            architecture: ARCHITECTURE.to_string(),
            platform: PLATFORM.to_string(),
            agent_id: self.config.agent_id.clone(),
            initialized: self.lifecycle.is_initialized(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use openalaw_core::agent::{KeywordSet, RoutingRules};

    use super::*;
    use crate::api::HttpMethod;

    async fn ready_agent() -> CoreAgent {
        let agent = CoreAgent::default();
        agent.initialize().await.expect("initialize");
        agent
    }

    #[tokio::test]
    async fn process_task_requires_initialization() {
        let agent = CoreAgent::default();
        let err = agent
            .process_task("write some code")
            .await
            .expect_err("uninitialized agent must refuse");
        assert_eq!(err.component, Component::CoreAgent);
        assert!(agent.enqueue("x".into()).await.is_err());
        assert!(agent.process_queue().await.is_err());
        assert!(agent.api().is_err());
        assert!(agent.ollama().is_err());
    }

    #[tokio::test]
    async fn routes_and_formats_tasks() {
        let agent = ready_agent().await;
        assert_eq!(
            agent.process_task("Analyze this input").await.expect("process"),
            "[REMOTE] Processed: Analyze this input..."
        );
        assert_eq!(
            agent.process_task("debug the swipe gesture").await.expect("process"),
            "[LOCAL] Processed: debug the swipe gesture..."
        );
        assert_eq!(
            agent.process_task("").await.expect("process"),
            "[LOCAL] Processed: ..."
        );
    }

    #[tokio::test]
    async fn classification_needs_no_initialization() {
        let agent = CoreAgent::default();
        assert_eq!(agent.classify("summarize the code"), ExecutionTarget::Local);
        assert_eq!(agent.classify("summarize the news"), ExecutionTarget::Remote);
    }

    #[tokio::test]
    async fn uses_configured_routing_rules() {
        let agent = CoreAgent::new(AgentConfig {
            routing: RoutingRules {
                code: KeywordSet::new(["kotlin"]),
                analysis: KeywordSet::new(["review"]),
            },
            ..AgentConfig::default()
        });
        agent.initialize().await.expect("initialize");
        assert_eq!(
            agent.process_task("review this kotlin").await.expect("process"),
            "[LOCAL] Processed: review this kotlin..."
        );
        assert_eq!(
            agent.process_task("review my essay").await.expect("process"),
            "[REMOTE] Processed: review my essay..."
        );
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let agent = ready_agent().await;
        agent.enqueue("pending".into()).await.expect("enqueue");
        agent.initialize().await.expect("second initialize");
        assert_eq!(agent.state(), InitState::Initialized);
        assert_eq!(agent.process_queue().await.expect("drain"), 1);
    }

    #[tokio::test]
    async fn queue_drains_exactly_what_was_enqueued() {
        let agent = ready_agent().await;
        assert_eq!(agent.process_queue().await.expect("drain"), 0);
        for task in ["one", "two", "three", "four"] {
            agent.enqueue(task.into()).await.expect("enqueue");
        }
        assert_eq!(agent.process_queue().await.expect("drain"), 4);
        assert_eq!(agent.process_queue().await.expect("drain"), 0);
    }

    #[tokio::test]
    async fn status_reflects_initialization_and_is_stable() {
        let agent = CoreAgent::default();
        assert!(!agent.status().initialized);

        agent.initialize().await.expect("initialize");
        let first = agent.status();
        let mut second = agent.status();
        assert!(first.initialized);
        assert_eq!(first.agent_id, "AgentBot11");
        assert_eq!(first.architecture, "ARM");
        assert_eq!(first.platform, "Android");
        second.timestamp = first.timestamp;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn blank_agent_id_reports_default_identity() {
        let agent = CoreAgent::new(AgentConfig {
            agent_id: String::new(),
            ..AgentConfig::default()
        });
        assert_eq!(agent.status().agent_id, "AgentBot11");

        agent.initialize().await.expect("initialize");
        assert_eq!(
            agent.status().agent_id,
            agent.resolved_config().expect("config").agent_id
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_initialize_leaves_agent_usable() {
        let agent = Arc::new(CoreAgent::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let agent = Arc::clone(&agent);
                tokio::spawn(async move {
                    agent.initialize().await.expect("initialize");
                    agent.enqueue(format!("task {i}")).await
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.expect("join").is_ok());
        }
        assert_eq!(agent.process_queue().await.expect("drain"), 8);
    }

    #[tokio::test]
    async fn bridges_are_reachable_after_initialization() {
        let agent = ready_agent().await;
        let resp = agent
            .api()
            .expect("api")
            .call_api("/status", HttpMethod::Get, None)
            .await
            .expect("call");
        assert!(resp.success);
        let generation = agent
            .ollama()
            .expect("ollama")
            .generate("hi", None)
            .await
            .expect("generate");
        assert_eq!(generation.response, "Generated response");
        assert_eq!(
            agent.resolved_config().expect("config").agent_id,
            "AgentBot11"
        );
    }
}
