//! Unified error type for all sinklog operations.

use std::path::PathBuf;

/// Error type for sinklog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// JSON config parsing error.
    ConfigJson(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Rotation path pattern could not be compiled.
    InvalidPattern { pattern: String, reason: String },
    /// Timestamp layout contains an unknown strftime specifier.
    InvalidLayout(String),
    /// Invalid log level string.
    InvalidLevel(String),
    /// A file sink was written to before `init` opened its file.
    SinkNotOpen(PathBuf),
    /// A sink's `init` failed while the logger was being built or a sink registered.
    SinkInit { sink: String, source: Box<Self> },
    /// The logger's queue has been closed.
    Closed,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigJson(e) => write!(f, "json parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid rotate pattern ({pattern}): {reason}")
            }
            Self::InvalidLayout(layout) => write!(f, "invalid timestamp layout: {layout}"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::SinkNotOpen(p) => write!(f, "no opened file: {}", p.display()),
            Self::SinkInit { sink, source } => write!(f, "failed to init {sink}: {source}"),
            Self::Closed => write!(f, "logger is closed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::ConfigJson(e) => Some(e),
            Self::SinkInit { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::ConfigJson(e)
    }
}
