use crate::core::error::LogError;
use crate::loggers::attr::{self, Attr};
use crate::loggers::core::{LogLevel, LogRecord, LogStatus};
use crate::loggers::queue::{BoundedQueue, TryPush};
use crate::loggers::signal::{completion, CompletionSignal};
use crate::loggers::sink::{JsonSink, LogSink, SinkHandle};
use crate::loggers::worker::LogWorker;
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Duration;

pub const DEFAULT_BUFFER_SIZE: usize = 100;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Construction options. Zero-valued fields fall back to the defaults independently.
#[derive(Clone, Default)]
pub struct LoggerConfig {
    /// Queue capacity; `0` means [`DEFAULT_BUFFER_SIZE`].
    pub buffer_size: usize,
    /// Output backend; `None` means JSON lines on stdout.
    pub sink: Option<Arc<dyn LogSink>>,
    /// Records below this level are filtered out at the call site.
    pub level: LogLevel,
    /// Total push attempts before a record is dropped; `0` means [`DEFAULT_MAX_ATTEMPTS`].
    pub max_attempts: u32,
    /// Pause between attempts; zero means [`DEFAULT_RETRY_DELAY`].
    pub retry_delay: Duration,
}

/// Options that can be swapped while the logger runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeOptions {
    pub level: LogLevel,
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

struct Inner {
    queue: BoundedQueue,
    sink: SinkHandle,
    done: CompletionSignal,
    options: ArcSwap<RuntimeOptions>,
    worker_thread: ThreadId,
}

/// Handle to an asynchronous logger. Clones share the same queue and worker.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
        }
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.config.sink = Some(sink);
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    pub fn build(self) -> Result<Logger, LogError> {
        Logger::with_config(self.config)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger with the given queue capacity writing JSON lines to stdout.
    pub fn new(buffer_size: usize) -> Result<Self, LogError> {
        Self::with_config(LoggerConfig {
            buffer_size,
            ..LoggerConfig::default()
        })
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Builds the queue, starts the worker, and returns the handle.
    pub fn with_config(config: LoggerConfig) -> Result<Self, LogError> {
        let buffer_size = if config.buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            config.buffer_size
        };
        let backend: Arc<dyn LogSink> = match config.sink {
            Some(sink) => sink,
            None => Arc::new(JsonSink::stdout()),
        };
        let options = RuntimeOptions {
            level: config.level,
            max_attempts: if config.max_attempts == 0 {
                DEFAULT_MAX_ATTEMPTS
            } else {
                config.max_attempts
            },
            retry_delay: if config.retry_delay.is_zero() {
                DEFAULT_RETRY_DELAY
            } else {
                config.retry_delay
            },
        };

        let (queue, receiver) = BoundedQueue::new(buffer_size);
        let sink = SinkHandle::new(backend);
        let (notifier, done) = completion();
        let worker_thread = LogWorker::new(receiver, sink.clone(), notifier).spawn()?;

        Ok(Self {
            inner: Arc::new(Inner {
                queue,
                sink,
                done,
                options: ArcSwap::from_pointee(options),
                worker_thread,
            }),
        })
    }

    /// Enqueues a record, retrying while the queue is full.
    ///
    /// Never blocks longer than `(max_attempts - 1) * retry_delay`. Each retry is
    /// announced through the sink; exhausting the attempts reports an error through
    /// the sink and drops the record.
    pub fn log(&self, level: LogLevel, msg: impl Into<String>, attrs: Vec<Attr>) -> LogStatus {
        let opts = **self.inner.options.load();
        if level < opts.level {
            return LogStatus::Filtered;
        }

        let mut record = LogRecord::new(level, msg, attrs);
        let mut attempt = 1;
        loop {
            match self.inner.queue.try_push(record) {
                TryPush::Enqueued => return LogStatus::Enqueued { attempts: attempt },
                TryPush::Closed(_) => return LogStatus::Closed,
                TryPush::Full(back) => record = back,
            }
            if attempt >= opts.max_attempts {
                break;
            }
            self.inner.sink.emit_now(
                LogLevel::Warn,
                "retrying log message due to full buffer",
                vec![attr::int("attempt", attempt as i64)],
            );
            thread::sleep(opts.retry_delay);
            attempt += 1;
        }

        self.inner.sink.emit_now(
            LogLevel::Error,
            "failed to log",
            vec![attr::string("error", "logging buffer channel full")],
        );
        LogStatus::Dropped { attempts: attempt }
    }

    pub fn debug(&self, msg: impl Into<String>, attrs: Vec<Attr>) {
        let _ = self.log(LogLevel::Debug, msg, attrs);
    }

    pub fn info(&self, msg: impl Into<String>, attrs: Vec<Attr>) {
        let _ = self.log(LogLevel::Info, msg, attrs);
    }

    pub fn warn(&self, msg: impl Into<String>, attrs: Vec<Attr>) {
        let _ = self.log(LogLevel::Warn, msg, attrs);
    }

    pub fn error(&self, msg: impl Into<String>, attrs: Vec<Attr>) {
        let _ = self.log(LogLevel::Error, msg, attrs);
    }

    /// Closes the queue and blocks until the worker has written every pending record.
    ///
    /// Safe to call more than once. Must not be called from inside a sink, since that
    /// runs on the worker thread.
    pub fn shutdown(&self) -> Result<(), LogError> {
        self.begin_shutdown()?;
        self.inner.done.wait_blocking();
        Ok(())
    }

    /// Async form of [`Logger::shutdown`].
    pub async fn shutdown_async(&self) -> Result<(), LogError> {
        self.begin_shutdown()?;
        self.inner.done.wait().await;
        Ok(())
    }

    fn begin_shutdown(&self) -> Result<(), LogError> {
        if thread::current().id() == self.inner.worker_thread {
            return Err(LogError::ShutdownFromWorker);
        }
        self.inner.queue.close();
        Ok(())
    }

    pub fn set_level(&self, level: LogLevel) {
        self.inner.options.rcu(|cur| RuntimeOptions { level, ..**cur });
    }

    pub fn set_retry_policy(&self, max_attempts: u32, retry_delay: Duration) {
        self.inner.options.rcu(|cur| RuntimeOptions {
            max_attempts: max_attempts.max(1),
            retry_delay: if retry_delay.is_zero() {
                DEFAULT_RETRY_DELAY
            } else {
                retry_delay
            },
            ..**cur
        });
    }

    pub fn options(&self) -> RuntimeOptions {
        **self.inner.options.load()
    }

    pub fn capacity(&self) -> usize {
        self.inner.queue.capacity()
    }

    /// Records waiting for the worker.
    pub fn pending(&self) -> usize {
        self.inner.queue.len()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.queue.is_closed()
    }

    /// True once the worker has drained the queue and exited.
    pub fn is_finished(&self) -> bool {
        self.inner.done.is_signaled()
    }

    /// Whether both handles refer to the same logger.
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loggers::sink::MemorySink;

    fn memory_logger(buffer_size: usize) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder()
            .buffer_size(buffer_size)
            .with_sink(sink.clone())
            .build()
            .unwrap();
        (logger, sink)
    }

    #[test]
    fn test_defaults_apply_per_field() {
        let logger = Logger::with_config(LoggerConfig::default()).unwrap();
        assert_eq!(logger.capacity(), DEFAULT_BUFFER_SIZE);
        let opts = logger.options();
        assert_eq!(opts.max_attempts, 3);
        assert_eq!(opts.retry_delay, Duration::from_millis(10));
        assert_eq!(opts.level, LogLevel::Debug);
        logger.shutdown().unwrap();

        let (logger, _sink) = memory_logger(7);
        assert_eq!(logger.capacity(), 7);
        logger.shutdown().unwrap();
    }

    #[test]
    fn test_levels_reach_sink_with_attrs() {
        let (logger, sink) = memory_logger(16);
        logger.debug("d", vec![]);
        logger.info("i", vec![attr::string("key", "value")]);
        logger.warn("w", vec![]);
        logger.error("e", vec![]);
        logger.shutdown().unwrap();

        let recs = sink.records();
        let levels: Vec<_> = recs.iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error]
        );
        assert_eq!(recs[1].attrs, vec![attr::string("key", "value")]);
    }

    #[test]
    fn test_level_filter_and_swap() {
        let (logger, sink) = memory_logger(16);
        logger.set_level(LogLevel::Warn);
        assert_eq!(logger.log(LogLevel::Info, "hidden", vec![]), LogStatus::Filtered);
        assert!(logger.log(LogLevel::Error, "shown", vec![]).is_enqueued());

        logger.set_level(LogLevel::Debug);
        assert!(logger.log(LogLevel::Debug, "back", vec![]).is_enqueued());
        logger.shutdown().unwrap();

        assert_eq!(sink.messages(), ["shown", "back"]);
    }

    #[test]
    fn test_log_after_shutdown_is_closed() {
        let (logger, sink) = memory_logger(4);
        logger.info("before", vec![]);
        logger.shutdown().unwrap();

        assert!(logger.is_closed());
        assert!(logger.is_finished());
        assert_eq!(logger.log(LogLevel::Info, "after", vec![]), LogStatus::Closed);
        assert_eq!(sink.messages(), ["before"]);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (logger, _sink) = memory_logger(4);
        logger.shutdown().unwrap();
        logger.shutdown().unwrap();
        let clone = logger.clone();
        clone.shutdown().unwrap();
    }

    #[test]
    fn test_retry_policy_clamps_attempts() {
        let (logger, _sink) = memory_logger(4);
        logger.set_retry_policy(0, Duration::from_millis(1));
        assert_eq!(logger.options().max_attempts, 1);
        assert_eq!(logger.options().retry_delay, Duration::from_millis(1));
        logger.shutdown().unwrap();
    }

    #[test]
    fn test_retry_policy_zero_delay_falls_back_to_default() {
        let (logger, _sink) = memory_logger(4);
        logger.set_retry_policy(3, Duration::ZERO);
        assert_eq!(logger.options().retry_delay, DEFAULT_RETRY_DELAY);
        assert_eq!(logger.options().retry_delay, Duration::from_millis(10));
        logger.shutdown().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_async_drains() {
        let (logger, sink) = memory_logger(64);
        for i in 0..50 {
            logger.info(format!("n{}", i), vec![attr::int("i", i)]);
        }
        logger.shutdown_async().await.unwrap();
        assert_eq!(sink.len(), 50);
    }
}
