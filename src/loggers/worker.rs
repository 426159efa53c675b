use crate::core::error::LogError;
use crate::loggers::queue::QueueReceiver;
use crate::loggers::signal::Notifier;
use crate::loggers::sink::SinkHandle;
use std::thread::{self, ThreadId};

const WORKER_THREAD_NAME: &str = "quelog-worker";

/// Sole consumer of the queue and sole writer of drained records.
pub struct LogWorker {
    receiver: QueueReceiver,
    sink: SinkHandle,
    done: Notifier,
}

impl LogWorker {
    pub fn new(receiver: QueueReceiver, sink: SinkHandle, done: Notifier) -> Self {
        Self { receiver, sink, done }
    }

    /// Drains the queue until it is closed and empty, then raises the completion signal.
    pub async fn run(mut self) {
        while let Some(record) = self.receiver.pop().await {
            self.sink.emit(&record);
        }
        self.sink.flush();
        self.done.signal();
    }

    /// Runs the worker on its own thread with a current-thread runtime, so callers
    /// never need a runtime of their own and can block on shutdown from anywhere.
    pub fn spawn(self) -> Result<ThreadId, LogError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| LogError::WorkerError(format!("Runtime Error: {}", e)))?;

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || rt.block_on(self.run()))
            .map_err(|e| LogError::WorkerError(format!("Spawn Error: {}", e)))?;

        Ok(handle.thread().id())
    }
}
