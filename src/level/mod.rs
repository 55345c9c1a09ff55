//! Severity levels that gate which records reach the queue and which sinks accept them.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the logger can compare a record's level against the configured threshold
/// and file sinks can test it against their `[floor, ceil]` band.
///
/// `Public` is not a severity but an audience tier (records meant for a public/audit log). It
/// sorts after `Fatal` so comparisons stay total; sinks address it with a `Public..=Public` band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// High-volume instrumentation that would be too noisy outside of development.
    Trace = 0,
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    #[default]
    Debug = 1,
    /// Normal operational milestones.
    Info = 2,
    /// Non-fatal anomalies that may need attention.
    Warn = 3,
    /// Failures that prevent an operation from completing.
    Error = 4,
    /// Failures the process cannot recover from.
    Fatal = 5,
    /// Records addressed to the public log rather than to operators.
    Public = 6,
}

impl Level {
    /// Lowercase because config files and CLI args use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Public => "public",
        }
    }

    /// The tag written into every encoded line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Public => "PUBLIC",
        }
    }

    /// Inverse of the `repr(u8)` discriminant; the logger stores its threshold in an `AtomicU8`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Trace),
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warn),
            4 => Some(Self::Error),
            5 => Some(Self::Fatal),
            6 => Some(Self::Public),
            _ => None,
        }
    }

    /// Used by help output, CLI value parsing, and tests.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Fatal,
            Self::Public,
        ]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "public" => Ok(Self::Public),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Inclusive `[floor, ceil]` range a sink accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBand {
    pub floor: Level,
    pub ceil: Level,
}

impl LevelBand {
    #[must_use]
    pub const fn new(floor: Level, ceil: Level) -> Self {
        Self { floor, ceil }
    }

    /// Every level, `Public` included.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(Level::Trace, Level::Public)
    }

    #[must_use]
    pub fn contains(self, level: Level) -> bool {
        level >= self.floor && level <= self.ceil
    }
}

impl Default for LevelBand {
    fn default() -> Self {
        Self::all()
    }
}
