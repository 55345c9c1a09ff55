//! Configuration struct definitions.
//!
//! Field aliases accept the camel-cased keys of the older JSON layout
//! (`FileWriter.On`, `DeleteCycle`, `logPath`, ...) so existing config files keep working.

use serde::Deserialize;

/// Settings that apply to the logger as a whole.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum level accepted by the logger.
    pub level: String,
    /// strftime layout for the record timestamp.
    pub timestamp_format: String,
    /// Records the queue holds before producers block.
    pub queue_capacity: usize,
    /// Initial capacity of each pooled encode buffer.
    pub buffer_capacity: usize,
    /// Threshold of sinklog's own stderr diagnostics.
    pub internal_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            timestamp_format: crate::fmt::DEFAULT_LAYOUT.to_string(),
            queue_capacity: 1024,
            buffer_capacity: crate::pool::DEFAULT_BUFFER_CAPACITY,
            internal_level: "warning".to_string(),
        }
    }
}

/// File sinks. Up to three are derived from one section: the main log, an optional
/// warning/error log, and an optional public log.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(alias = "On")]
    pub enabled: bool,
    /// Files under `root` older than this many seconds are deleted; 0 disables deletion.
    #[serde(alias = "DeleteCycle")]
    pub retention_secs: u64,
    /// Active main log file.
    #[serde(alias = "logPath")]
    pub path: Option<String>,
    /// Archive pattern for the main log.
    #[serde(alias = "RotateLogPath")]
    pub rotate_path: Option<String>,
    /// Active warning/error log file.
    #[serde(alias = "WfLogPath")]
    pub warning_path: Option<String>,
    #[serde(alias = "RotateWfLogPath")]
    pub rotate_warning_path: Option<String>,
    /// Active public log file.
    #[serde(alias = "PublicLogPath")]
    pub public_path: Option<String>,
    #[serde(alias = "RotatePublicLogPath")]
    pub rotate_public_path: Option<String>,
    /// Directory scanned for expired files.
    pub root: Option<String>,
    /// Gzip archives after rotation.
    pub compress: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            retention_secs: 7 * 24 * 3600,
            path: None,
            rotate_path: None,
            warning_path: None,
            rotate_warning_path: None,
            public_path: None,
            rotate_public_path: None,
            root: None,
            compress: false,
        }
    }
}

/// Console sink.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    #[serde(alias = "On")]
    pub enabled: bool,
    #[serde(alias = "Color")]
    pub colors: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colors: false,
        }
    }
}

/// Periods of the dispatch thread's maintenance tickers; 0 disables one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntervalsConfig {
    pub flush_ms: u64,
    pub rotate_secs: u64,
    pub delete_secs: u64,
}

impl Default for IntervalsConfig {
    fn default() -> Self {
        Self {
            flush_ms: 1000,
            rotate_secs: 10,
            delete_secs: 3600,
        }
    }
}
