//! Stepwise logger construction. Sinks are collected here and initialized in `build`, so a
//! bad path or pattern surfaces as one error before any thread is started.

use super::Logger;
use crate::dispatch::{self, Intervals};
use crate::error::Error;
use crate::fmt::{DEFAULT_LAYOUT, Encoder};
use crate::internal;
use crate::level::{Level, LevelBand};
use crate::pool::{BufferPool, DEFAULT_BUFFER_CAPACITY};
use crate::sink::{ConsoleSink, FileSink, Sink, SinkRegistry};
use crossbeam_channel::bounded;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Records the queue holds before producers block.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

pub struct LoggerBuilder {
    level: Level,
    layout: String,
    queue_capacity: usize,
    buffer_capacity: usize,
    pool_slots: Option<usize>,
    intervals: Intervals,
    sinks: Vec<Box<dyn Sink>>,
    /// First error raised by a sub-builder; reported by `build`.
    deferred: Option<Error>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: Level::Debug,
            layout: DEFAULT_LAYOUT.to_string(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            pool_slots: None,
            intervals: Intervals::default(),
            sinks: Vec::new(),
            deferred: None,
        }
    }

    /// Records below `level` are dropped before encoding.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// strftime layout of the record timestamp.
    #[must_use]
    pub fn timestamp_format(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Clamped to at least one slot.
    #[must_use]
    pub const fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes;
        self
    }

    /// Pooled buffers; defaults to the queue capacity.
    #[must_use]
    pub const fn pool_slots(mut self, slots: usize) -> Self {
        self.pool_slots = Some(slots);
        self
    }

    #[must_use]
    pub const fn intervals(mut self, intervals: Intervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// Zero disables the flush ticker.
    #[must_use]
    pub const fn flush_interval(mut self, period: Duration) -> Self {
        self.intervals.flush = period;
        self
    }

    /// Zero disables the rotate ticker.
    #[must_use]
    pub const fn rotate_interval(mut self, period: Duration) -> Self {
        self.intervals.rotate = period;
        self
    }

    /// Zero disables the delete ticker.
    #[must_use]
    pub const fn delete_interval(mut self, period: Duration) -> Self {
        self.intervals.delete = period;
        self
    }

    /// Any sink, including ones defined outside this crate. Registration order is write order.
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use]
    pub fn file(self, path: impl Into<PathBuf>) -> FileBuilder {
        FileBuilder {
            parent: self,
            sink: FileSink::new(path),
            pattern: None,
        }
    }

    #[must_use]
    pub fn console(self) -> ConsoleBuilder {
        ConsoleBuilder {
            parent: self,
            sink: ConsoleSink::new(),
        }
    }

    /// Initializes every sink in order, then starts the dispatch thread.
    ///
    /// # Errors
    /// A deferred sub-builder error, [`Error::InvalidLayout`], [`Error::SinkInit`] for the
    /// first sink whose `init` fails, or an I/O error if the thread can't be spawned.
    pub fn build(self) -> Result<Logger, Error> {
        if let Some(e) = self.deferred {
            return Err(e);
        }
        let encoder = Encoder::new(self.layout)?;

        let mut registry = SinkRegistry::new();
        for mut sink in self.sinks {
            sink.init().map_err(|source| Error::SinkInit {
                sink: sink.name(),
                source: Box::new(source),
            })?;
            registry.push(sink);
        }
        if registry.is_empty() {
            internal::warn("LOGGER", "No sinks registered");
        }

        let capacity = self.queue_capacity.max(1);
        let pool = Arc::new(BufferPool::new(
            self.pool_slots.unwrap_or(capacity),
            self.buffer_capacity,
        ));
        let (sender, receiver) = bounded(capacity);
        let worker = dispatch::spawn(receiver, registry, Arc::clone(&pool), self.intervals)?;

        internal::debug(
            "LOGGER",
            &format!("Logger ready (level={}, queue={capacity})", self.level),
        );
        Ok(Logger::start(self.level, encoder, pool, sender, worker))
    }
}

/// File sink sub-builder; `done` returns to the logger builder.
pub struct FileBuilder {
    parent: LoggerBuilder,
    sink: FileSink,
    pattern: Option<String>,
}

impl FileBuilder {
    #[must_use]
    pub fn floor(mut self, level: Level) -> Self {
        self.sink = self.sink.floor(level);
        self
    }

    #[must_use]
    pub fn ceil(mut self, level: Level) -> Self {
        self.sink = self.sink.ceil(level);
        self
    }

    #[must_use]
    pub fn band(mut self, band: LevelBand) -> Self {
        self.sink = self.sink.band(band);
        self
    }

    /// Archive path pattern (`%Y %M %D %H %m`); compiled in `done`.
    #[must_use]
    pub fn rotate(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn retention(mut self, retention: Duration) -> Self {
        self.sink = self.sink.retention(retention);
        self
    }

    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sink = self.sink.root(root);
        self
    }

    #[must_use]
    pub fn compress(mut self, enabled: bool) -> Self {
        self.sink = self.sink.compress(enabled);
        self
    }

    #[must_use]
    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.sink = self.sink.buffer_size(bytes);
        self
    }

    /// Pattern errors are held back and returned from [`LoggerBuilder::build`].
    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        if let Some(pattern) = self.pattern.take()
            && let Err(e) = self.sink.set_path_pattern(&pattern)
        {
            if self.parent.deferred.is_none() {
                self.parent.deferred = Some(e);
            }
            return self.parent;
        }
        self.parent.sinks.push(Box::new(self.sink));
        self.parent
    }
}

/// Console sink sub-builder.
pub struct ConsoleBuilder {
    parent: LoggerBuilder,
    sink: ConsoleSink,
}

impl ConsoleBuilder {
    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.sink = self.sink.colors(enabled);
        self
    }

    #[must_use]
    pub fn done(mut self) -> LoggerBuilder {
        self.parent.sinks.push(Box::new(self.sink));
        self.parent
    }
}
