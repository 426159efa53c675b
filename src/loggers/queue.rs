//! Bounded FIFO between the producing call sites and the single worker.
//!
//! Producers push with [`BoundedQueue::try_push`] from any thread, with or without a
//! tokio runtime. Closing swaps the shared sender out; the channel itself ends once the
//! last in-flight push has released its sender, so every accepted record still reaches
//! the [`QueueReceiver`].

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::mpsc::{self, error::TrySendError};
use crate::loggers::core::LogRecord;

/// Result of a single non-blocking push.
#[derive(Debug)]
pub enum TryPush {
    Enqueued,
    /// Buffer full; the record is handed back for another attempt.
    Full(LogRecord),
    /// Queue closed; the record is handed back to be discarded.
    Closed(LogRecord),
}

pub struct BoundedQueue {
    sender: ArcSwapOption<mpsc::Sender<LogRecord>>,
    closed: AtomicBool,
    capacity: usize,
    // Shared with the receiver; outlives the sender slot so the count holds during drain.
    buffered: Arc<AtomicUsize>,
}

pub struct QueueReceiver {
    receiver: mpsc::Receiver<LogRecord>,
    buffered: Arc<AtomicUsize>,
}

impl BoundedQueue {
    /// Creates a queue holding at most `capacity` records.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> (Self, QueueReceiver) {
        assert!(capacity > 0, "queue capacity must be positive");
        let (tx, rx) = mpsc::channel(capacity);
        let buffered = Arc::new(AtomicUsize::new(0));
        let queue = Self {
            sender: ArcSwapOption::from_pointee(tx),
            closed: AtomicBool::new(false),
            capacity,
            buffered: buffered.clone(),
        };
        (queue, QueueReceiver { receiver: rx, buffered })
    }

    pub fn try_push(&self, record: LogRecord) -> TryPush {
        if self.closed.load(Ordering::Acquire) {
            return TryPush::Closed(record);
        }
        let guard = self.sender.load();
        let Some(tx) = &*guard else {
            return TryPush::Closed(record);
        };
        // Count before sending so a fast pop can never take the counter below zero.
        self.buffered.fetch_add(1, Ordering::AcqRel);
        match tx.try_send(record) {
            Ok(()) => TryPush::Enqueued,
            Err(err) => {
                self.buffered.fetch_sub(1, Ordering::AcqRel);
                match err {
                    TrySendError::Full(record) => TryPush::Full(record),
                    TrySendError::Closed(record) => TryPush::Closed(record),
                }
            }
        }
    }

    /// Forbids further pushes. Records already queued stay poppable.
    ///
    /// Returns `true` for the call that actually closed the queue.
    pub fn close(&self) -> bool {
        let first = !self.closed.swap(true, Ordering::AcqRel);
        self.sender.store(None);
        first
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records accepted but not yet popped, including after `close`.
    pub fn len(&self) -> usize {
        self.buffered.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueueReceiver {
    /// Waits for the next record; `None` once the queue is closed and drained.
    pub async fn pop(&mut self) -> Option<LogRecord> {
        let record = self.receiver.recv().await?;
        self.buffered.fetch_sub(1, Ordering::AcqRel);
        Some(record)
    }
}
