use async_trait::async_trait;

/// FIFO queue of pending task strings owned by the agent's scheduler.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Append a task at the back of the queue.
    async fn add_task(&self, task: String);

    /// Remove and discard queued tasks front to back until the queue is empty.
    /// Returns how many tasks were removed; an empty queue yields zero.
    async fn process_queue(&self) -> usize;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
