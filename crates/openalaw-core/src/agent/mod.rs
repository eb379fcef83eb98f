mod routing;

pub use routing::{
    ExecutionTarget, KeywordSet, RoutingRules, DEFAULT_ANALYSIS_KEYWORDS, DEFAULT_CODE_KEYWORDS,
};

use anyhow::Result;
use async_trait::async_trait;

use crate::{
    lifecycle::{InitState, UninitializedError},
    status::CoreStatus,
};

/// Number of task characters echoed back by the dispatch router.
pub const PREVIEW_CHARS: usize = 50;

/// Format the placeholder answer for a task routed to `target`.
pub fn format_processed(target: ExecutionTarget, task: &str) -> String {
    let preview: String = task.chars().take(PREVIEW_CHARS).collect();
    format!("[{}] Processed: {preview}...", target.label())
}

/// Contract for the task-handling side of the system (classification,
/// queuing, execution). The orchestrator only talks to agents through this.
#[async_trait]
pub trait TaskAgent: Send + Sync {
    /// Short name used for logging.
    fn name(&self) -> &'static str;

    /// Build internal components. Calling it again once initialized is a no-op.
    async fn initialize(&self) -> Result<()>;

    fn state(&self) -> InitState;

    /// Pick an execution target for a task. Pure; needs no initialization.
    fn classify(&self, task: &str) -> ExecutionTarget;

    /// Route a task and return the formatted result.
    async fn process_task(&self, task: &str) -> Result<String, UninitializedError>;

    /// Append a task to the agent's queue.
    async fn enqueue(&self, task: String) -> Result<(), UninitializedError>;

    /// Drain the queue, returning how many tasks were removed.
    async fn process_queue(&self) -> Result<usize, UninitializedError>;

    /// Fresh status snapshot.
    fn status(&self) -> CoreStatus;
}
