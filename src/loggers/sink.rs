//! Output backends and the adapter the logger talks to.
//!
//! A [`LogSink`] formats and writes finished records; how it handles its own write
//! failures is its business, so `emit` has no error path. The logger only ever reaches a
//! sink through a [`SinkHandle`].

use crate::loggers::attr::Attr;
use crate::loggers::core::{LogLevel, LogRecord};
use serde_json::{Map, Value};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

/// Output backend for log records.
pub trait LogSink: Send + Sync {
    /// Format and write one record.
    fn emit(&self, record: &LogRecord);

    /// Flush any buffered output.
    fn flush(&self) {}
}

/// Cheap, cloneable handle around the configured backend.
///
/// The worker emits drained records through it; producers use it directly for
/// diagnostics about the logger itself.
#[derive(Clone)]
pub struct SinkHandle {
    backend: Arc<dyn LogSink>,
}

impl SinkHandle {
    pub fn new(backend: Arc<dyn LogSink>) -> Self {
        Self { backend }
    }

    pub fn emit(&self, record: &LogRecord) {
        self.backend.emit(record);
    }

    /// Builds and emits a record synchronously on the calling thread, bypassing the queue.
    pub fn emit_now(&self, level: LogLevel, msg: &str, attrs: Vec<Attr>) {
        self.backend.emit(&LogRecord::new(level, msg, attrs));
    }

    pub fn flush(&self) {
        self.backend.flush();
    }
}

fn lock<W>(m: &Mutex<W>) -> MutexGuard<'_, W> {
    // A panic mid-write leaves the writer usable.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// JSON-lines sink: `{"time":..,"level":..,"msg":..,<attrs>}` per record.
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The JSON object written for `record`.
    pub fn to_json(record: &LogRecord) -> Value {
        let mut obj = Map::new();
        obj.insert("time".into(), Value::String(record.ts.to_rfc3339()));
        obj.insert("level".into(), Value::String(record.level.as_str().into()));
        obj.insert("msg".into(), Value::String(record.msg.clone()));
        for a in &record.attrs {
            obj.insert(
                a.key.clone(),
                serde_json::to_value(&a.value).unwrap_or(Value::Null),
            );
        }
        Value::Object(obj)
    }
}

impl JsonSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> LogSink for JsonSink<W> {
    fn emit(&self, record: &LogRecord) {
        let line = Self::to_json(record);
        let _ = writeln!(lock(&self.writer), "{}", line);
    }

    fn flush(&self) {
        let _ = lock(&self.writer).flush();
    }
}

/// Human readable sink: `time LEVEL msg key=value ...`.
pub struct TextSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TextSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> LogSink for TextSink<W> {
    fn emit(&self, record: &LogRecord) {
        let mut line = format!(
            "{} {} {}",
            record.ts.to_rfc3339(),
            record.level,
            record.msg
        );
        for a in &record.attrs {
            line.push(' ');
            line.push_str(&a.to_string());
        }
        let _ = writeln!(lock(&self.writer), "{}", line);
    }

    fn flush(&self) {
        let _ = lock(&self.writer).flush();
    }
}

/// Keeps every emitted record in memory. Intended for tests.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        lock(&self.records).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.records).iter().map(|r| r.msg.clone()).collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        lock(&self.records).push(record.clone());
    }
}
