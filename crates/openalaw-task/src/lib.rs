use std::collections::VecDeque;

use async_trait::async_trait;
use openalaw_core::tasks::TaskQueue;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Characters of a task shown when it is enqueued.
const ENQUEUE_PREVIEW_CHARS: usize = 30;

/// In-memory, unbounded FIFO scheduler.
///
/// Each dequeue takes the lock on its own, so two concurrent drains split the
/// queue between them and never see the same task twice.
#[derive(Debug, Default)]
pub struct TaskScheduler {
    queue: Mutex<VecDeque<String>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    async fn pop_front(&self) -> Option<String> {
        self.queue.lock().await.pop_front()
    }
}

#[async_trait]
impl TaskQueue for TaskScheduler {
    #[instrument(skip_all)]
    async fn add_task(&self, task: String) {
        let preview: String = task.chars().take(ENQUEUE_PREVIEW_CHARS).collect();
        self.queue.lock().await.push_back(task);
        debug!("task added to queue: {preview}...");
    }

    #[instrument(skip(self))]
    async fn process_queue(&self) -> usize {
        let mut drained = 0;
        while let Some(task) = self.pop_front().await {
            debug!("processing from queue: {task}");
            drained += 1;
        }
        drained
    }

    async fn len(&self) -> usize {
        self.queue.lock().await.len()
    }
}
