//! The producer-facing half of the pipeline.
//!
//! A [`Logger`] filters by level, encodes on the caller's thread into a pooled buffer and
//! enqueues the result for the dispatch thread. It owns the queue's sending half and the
//! dispatch thread's handle; [`Logger::close`] (or dropping the logger) drops the sender,
//! waits for the thread to drain the queue, and flushes every sink one last time.

mod builder;
mod context;
mod from_config;

pub use builder::{ConsoleBuilder, FileBuilder, LoggerBuilder};
pub use context::{LogContext, new_log_id};
pub use from_config::file_sinks;

use crate::dispatch::Message;
use crate::error::Error;
use crate::fmt::{Body, Encoder, Field, Record, Value, list};
use crate::internal;
use crate::level::Level;
use crate::pool::BufferPool;
use crate::sink::{Sink, SinkRegistry};
use chrono::Local;
use crossbeam_channel::{SendError, Sender};
use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::JoinHandle;

/// Shared by reference across producer threads; every method takes `&self`.
pub struct Logger {
    threshold: AtomicU8,
    encoder: Encoder,
    pool: Arc<BufferPool>,
    /// `None` once closed. Producers hold the read side for the duration of one send.
    sender: RwLock<Option<Sender<Message>>>,
    worker: Mutex<Option<JoinHandle<SinkRegistry>>>,
}

/// Generates the templated, structured and list wrappers for one level.
macro_rules! level_methods {
    ($level:expr, $name:ident, $fields:ident, $list:ident) => {
        #[doc = concat!("Templated record at `", stringify!($name), "`.")]
        #[track_caller]
        pub fn $name(&self, template: &str, args: &[Value<'_>]) {
            self.log($level, template, args);
        }

        #[doc = concat!("Structured record at `", stringify!($name), "`.")]
        #[track_caller]
        pub fn $fields(&self, message: &str, fields: &[Field<'_>]) {
            self.log_fields($level, message, fields);
        }

        #[doc = concat!("Key/value list record at `", stringify!($name), "`.")]
        #[track_caller]
        pub fn $list(&self, keys: &[&str], values: &[Value<'_>]) {
            self.log_list($level, keys, values);
        }
    };
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn start(
        level: Level,
        encoder: Encoder,
        pool: Arc<BufferPool>,
        sender: Sender<Message>,
        worker: JoinHandle<SinkRegistry>,
    ) -> Self {
        Self {
            threshold: AtomicU8::new(level as u8),
            encoder,
            pool,
            sender: RwLock::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Current minimum level.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_u8(self.threshold.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Takes effect for every submission that starts after the store.
    pub fn set_level(&self, level: Level) {
        self.threshold.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a record at `level` would be encoded at all.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 >= self.threshold.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn timestamp_format(&self) -> &str {
        self.encoder.layout()
    }

    /// Templated record: `{}` takes the next argument, `{N}` argument N. With no arguments
    /// the template is written verbatim.
    #[track_caller]
    pub fn log(&self, level: Level, template: &str, args: &[Value<'_>]) {
        if self.enabled(level) {
            self.submit(level, Location::caller(), Body::Template { template, args });
        }
    }

    /// Message followed by ` key=value` pairs (`||key=value` at `Public`).
    #[track_caller]
    pub fn log_fields(&self, level: Level, message: &str, fields: &[Field<'_>]) {
        if self.enabled(level) {
            self.submit(level, Location::caller(), Body::Fields { message, fields });
        }
    }

    /// `=> k1=v1||k2=v2` from parallel key and value slices.
    #[track_caller]
    pub fn log_list(&self, level: Level, keys: &[&str], values: &[Value<'_>]) {
        if self.enabled(level) {
            let line = list::format_list(keys, values);
            self.submit_line(level, Location::caller(), &line);
        }
    }

    /// [`log_list`](Self::log_list) with a trailing `trace_id` pair.
    #[track_caller]
    pub fn log_list_traced(&self, level: Level, trace_id: &str, keys: &[&str], values: &[Value<'_>]) {
        if !self.enabled(level) {
            return;
        }
        let mut keys = keys.to_vec();
        keys.push("trace_id");
        let mut values = values.to_vec();
        values.push(Value::from(trace_id));
        let line = list::format_list(&keys, &values);
        self.submit_line(level, Location::caller(), &line);
    }

    level_methods!(Level::Trace, trace, trace_fields, trace_list);
    level_methods!(Level::Debug, debug, debug_fields, debug_list);
    level_methods!(Level::Info, info, info_fields, info_list);
    level_methods!(Level::Warn, warn, warn_fields, warn_list);
    level_methods!(Level::Error, error, error_fields, error_list);
    level_methods!(Level::Fatal, fatal, fatal_fields, fatal_list);
    level_methods!(Level::Public, public, public_fields, public_list);

    /// A pre-rendered line, written verbatim after the prefix.
    pub(crate) fn submit_line(&self, level: Level, location: &'static Location<'static>, line: &str) {
        self.submit(
            level,
            location,
            Body::Template {
                template: line,
                args: &[],
            },
        );
    }

    fn submit(&self, level: Level, location: &'static Location<'static>, body: Body<'_>) {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = guard.as_ref() else {
            return;
        };

        let mut encoded = self.pool.acquire(level);
        let record = Record {
            time: Local::now(),
            level,
            file: location.file(),
            line: location.line(),
            body,
        };
        self.encoder.encode(&record, encoded.buffer_mut());

        // Blocks while the queue is full.
        if let Err(SendError(Message::Record(encoded))) = sender.send(Message::Record(encoded)) {
            self.pool.release(encoded);
        }
    }

    /// Initializes `sink` and appends it after every sink registered so far. Records already
    /// queued are not delivered to it.
    ///
    /// # Panics
    /// If `init` fails or the logger is closed. Use [`try_register`](Self::try_register) to
    /// handle those cases.
    pub fn register(&self, sink: impl Sink + 'static) {
        if let Err(e) = self.try_register(sink) {
            panic!("sink registration failed: {e}");
        }
    }

    /// # Errors
    /// [`Error::SinkInit`] when `init` fails, [`Error::Closed`] after [`close`](Self::close).
    pub fn try_register(&self, mut sink: impl Sink + 'static) -> Result<(), Error> {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = guard.as_ref() else {
            return Err(Error::Closed);
        };
        sink.init().map_err(|source| Error::SinkInit {
            sink: sink.name(),
            source: Box::new(source),
        })?;
        sender
            .send(Message::Register(Box::new(sink)))
            .map_err(|_| Error::Closed)
    }

    /// Stops accepting records, waits until the dispatch thread has delivered every queued
    /// record, then flushes all sinks. Later calls return immediately.
    pub fn close(&self) {
        let sender = self
            .sender
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(worker) = worker else {
            return;
        };
        match worker.join() {
            Ok(mut registry) => {
                registry.flush_all();
                internal::debug(
                    "LOGGER",
                    &format!("Closed; {} sinks flushed", registry.len()),
                );
            }
            Err(_) => internal::error("LOGGER", "Dispatch thread panicked before draining"),
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("timestamp_format", &self.encoder.layout())
            .field("pool", &self.pool)
            .field("closed", &self.is_closed())
            .finish()
    }
}
