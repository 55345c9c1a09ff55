//! Delivery targets for encoded records.
//!
//! Every sink must open itself (`init`) and accept records (`write`). Flushing, rotation and
//! retention are optional: a sink advertises which of them it supports through
//! [`Capabilities`], and the registry reads that mask once at registration so the dispatch
//! timers only visit sinks that care.
//!
//! Sinks are driven exclusively from the dispatch thread, so they take `&mut self` and need no
//! internal locking; `Send` is the only bound.

mod compress;
mod console;
mod file;
mod pattern;
mod registry;
mod retention;

pub use console::ConsoleSink;
pub use file::{DEFAULT_WRITE_BUFFER, FileSink};
pub use pattern::{Component, PathPattern};
pub use retention::{DeleteReport, delete_expired};

pub(crate) use registry::SinkRegistry;

use crate::error::Error;
use crate::pool::Encoded;
use std::ops::BitOr;
use std::path::Path;

/// Optional abilities a sink supports beyond `init` and `write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Self = Self(0);
    pub const FLUSH: Self = Self(1);
    pub const ROTATE: Self = Self(1 << 1);
    pub const DELETE: Self = Self(1 << 2);
    pub const ALL: Self = Self(0b111);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// A delivery target driven by the dispatch thread.
pub trait Sink: Send {
    /// Short label used in diagnostics.
    fn name(&self) -> String {
        "sink".to_string()
    }

    /// Called once at registration. A failure aborts registration.
    ///
    /// # Errors
    /// Whatever prevents the sink from accepting records (unwritable path, missing directory).
    fn init(&mut self) -> Result<(), Error>;

    /// Delivers one record. Failures are reported on the diagnostic channel and never reach
    /// the caller of the logging API or affect other sinks.
    ///
    /// # Errors
    /// I/O errors from the underlying target.
    fn write(&mut self, record: &Encoded) -> Result<(), Error>;

    /// Which optional operations below are meaningful for this sink.
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Forces buffered bytes to durable storage.
    ///
    /// # Errors
    /// I/O errors from the underlying target.
    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Archives the current output if a rotation boundary was crossed.
    ///
    /// # Errors
    /// Rename or reopen failures.
    fn rotate(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Removes persisted artifacts older than the sink's retention window.
    ///
    /// # Errors
    /// Directory traversal failures.
    fn delete(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// File the sink is currently appending to, if it has one.
    fn active_path(&self) -> Option<&Path> {
        None
    }

    /// Another sink's active file; this sink's retention pass must leave it alone.
    fn protect_path(&mut self, _path: &Path) {}
}
