//! `sinklog` - asynchronous structured logging core.
//!
//! Producers format records on their own thread into pooled buffers and hand them to a
//! single dispatch thread over a bounded queue. That thread owns every sink, writes each
//! record to all of them in registration order, and runs the periodic flush, rotate and
//! delete passes:
//! - File sinks with a `[floor, ceil]` level band, time-based rotation (`%Y%M%D%H%m` archive
//!   patterns), optional gzip of archives, and age-based deletion
//! - Console sink with optional level colors
//! - Templated, structured (`key=value`) and key/value list records
//! - TOML or JSON configuration
//!
//! # Example
//!
//! ```no_run
//! use sinklog::{Level, Logger, Value};
//!
//! let logger = Logger::builder()
//!     .level(Level::Info)
//!     .file("/var/log/app/service.log")
//!         .rotate("/var/log/app/service.log.%Y%M%D%H")
//!         .done()
//!     .console()
//!         .colors(true)
//!         .done()
//!     .build()?;
//!
//! logger.info("service started", &[]);
//! logger.error("disk full on {0}", &[Value::from("/data")]);
//! logger.close();
//! # Ok::<(), sinklog::Error>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `sinklog` binary

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;
pub mod pool;
pub mod sink;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::Config;
pub use dispatch::Intervals;
pub use error::Error;
pub use fmt::{Encoder, Field, Value};
pub use level::{Level, LevelBand};
pub use logger::{LogContext, Logger, LoggerBuilder, new_log_id};
pub use pool::{BufferPool, Encoded};
pub use sink::{Capabilities, ConsoleSink, FileSink, PathPattern, Sink};
