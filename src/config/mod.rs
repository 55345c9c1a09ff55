//! Configuration loading.
//!
//! Config files are TOML by default; a `.json` extension selects JSON with the same schema.
//! Every section and field has a default, so an empty file still yields a working logger.

mod structs;

pub use structs::{ConsoleConfig, FileConfig, GeneralConfig, IntervalsConfig};

use crate::dispatch::Intervals;
use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Top-level shorthand for `general.level`; takes precedence when present.
    #[serde(alias = "LogLevel")]
    pub level: Option<String>,
    pub general: GeneralConfig,
    #[serde(alias = "FileWriter")]
    pub file: FileConfig,
    #[serde(alias = "ConsoleWriter")]
    pub console: ConsoleConfig,
    pub intervals: IntervalsConfig,
}

impl Config {
    /// Loads the config from the default location, or defaults if there is none.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or the file doesn't parse.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        internal::debug(
            "CONFIG",
            &format!("Loading config from {}", path.display()),
        );
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads an explicit file; the extension picks the format.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        let content = fs::read_to_string(path)?;
        let config = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// # Errors
    /// TOML syntax or type errors.
    pub fn from_toml_str(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// # Errors
    /// JSON syntax or type errors.
    pub fn from_json_str(content: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(content)?)
    }

    /// `~/.config/sinklog/sinklog.toml` on Linux; the platform config dir elsewhere.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("sinklog").join("sinklog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Effective level name: the top-level shorthand wins over `general.level`.
    #[must_use]
    pub fn level_name(&self) -> &str {
        self.level.as_deref().unwrap_or(&self.general.level)
    }

    /// Unknown names fall back to `debug` with a diagnostic rather than failing the load.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        let name = self.level_name();
        name.parse().unwrap_or_else(|_| {
            internal::warn(
                "CONFIG",
                &format!("Unknown level '{name}', using debug"),
            );
            Level::Debug
        })
    }

    /// Strict variant for callers that want misconfiguration to be fatal.
    ///
    /// # Errors
    /// [`crate::Error::InvalidLevel`] for an unknown level name.
    pub fn try_parse_level(&self) -> Result<Level, crate::Error> {
        let name = self.level_name();
        name.parse()
            .map_err(|_| crate::Error::InvalidLevel(name.to_string()))
    }

    #[must_use]
    pub const fn intervals(&self) -> Intervals {
        Intervals {
            flush: Duration::from_millis(self.intervals.flush_ms),
            rotate: Duration::from_secs(self.intervals.rotate_secs),
            delete: Duration::from_secs(self.intervals.delete_secs),
        }
    }
}

/// Expands a leading `~` and environment variables; unresolvable input is used verbatim.
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    shellexpand::full(path).map_or_else(
        |_| PathBuf::from(path),
        |expanded| PathBuf::from(expanded.as_ref()),
    )
}
