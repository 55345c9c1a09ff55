//! sinklog's own diagnostic channel. Sink failures inside the dispatch thread, config
//! warnings, and lifecycle events are reported here.
//!
//! It writes synchronously to stderr and never goes through a [`Logger`](crate::Logger): a
//! failing sink must not be able to report its failure into the pipeline it is breaking.
//!
//! The threshold is fixed once through a `OnceLock`, even if several entry points (CLI,
//! library callers, tests) race to call `init`.

use crate::config::Config;
use crate::level::Level;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Environment override consulted when nothing called `init_with_config` first.
pub const ENV_LEVEL: &str = "SINKLOG_INTERNAL_LEVEL";

static THRESHOLD: OnceLock<Level> = OnceLock::new();

fn threshold_from_env() -> Level {
    std::env::var(ENV_LEVEL)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Level::Warn)
}

/// Fallback initializer; reads [`ENV_LEVEL`] and defaults to `warning`.
///
/// Only the first call takes effect; later calls are no-ops.
pub fn init() {
    let was_init = THRESHOLD.get().is_some();
    THRESHOLD.get_or_init(threshold_from_env);
    if !was_init {
        debug("INTERNAL", "Diagnostic channel ready");
    }
}

/// Preferred initializer when a config is already loaded.
pub fn init_with_config(config: &Config) {
    let was_init = THRESHOLD.get().is_some();
    THRESHOLD.get_or_init(|| {
        config
            .general
            .internal_level
            .parse()
            .unwrap_or_else(|_| threshold_from_env())
    });
    if !was_init {
        debug(
            "INTERNAL",
            &format!("Diagnostic level: {}", config.general.internal_level),
        );
    }
}

/// Active threshold, initializing from the environment on first use.
#[must_use]
pub fn threshold() -> Level {
    *THRESHOLD.get_or_init(threshold_from_env)
}

fn log(level: Level, scope: &str, msg: &str) {
    if level < threshold() {
        return;
    }
    // Nothing sensible to do if stderr itself is gone.
    let _ = writeln!(
        io::stderr().lock(),
        "sinklog [{:<6}] {scope:<10}  {msg}",
        level.label()
    );
}

pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// Sink failures land here: reported, never propagated.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
