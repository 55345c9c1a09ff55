//! Logger construction from a loaded [`Config`].

use super::{Logger, LoggerBuilder};
use crate::config::{Config, expand_path};
use crate::error::Error;
use crate::internal;
use crate::level::{Level, LevelBand};
use crate::sink::FileSink;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The file sinks a config describes, unopened: the main log, then the warning log, then the
/// public log, each only when its path is set and non-empty. Empty when the file section is
/// disabled. Each sink's retention pass skips the other sinks' active files.
///
/// `Fatal` records land in the main file (when there is no warning file) and in the warning
/// file. Older deployments of the legacy JSON layout capped both bands at `Error`.
///
/// # Errors
/// [`Error::InvalidPattern`] for a rotation pattern that doesn't compile.
pub fn file_sinks(config: &Config) -> Result<Vec<FileSink>, Error> {
    let file = &config.file;
    if !file.enabled {
        return Ok(Vec::new());
    }

    let main_ceil = if set(file.warning_path.as_deref()).is_some() {
        Level::Info
    } else {
        Level::Fatal
    };
    let targets = [
        (
            file.path.as_deref(),
            file.rotate_path.as_deref(),
            LevelBand::new(Level::Trace, main_ceil),
        ),
        (
            file.warning_path.as_deref(),
            file.rotate_warning_path.as_deref(),
            LevelBand::new(Level::Warn, Level::Fatal),
        ),
        (
            file.public_path.as_deref(),
            file.rotate_public_path.as_deref(),
            LevelBand::new(Level::Public, Level::Public),
        ),
    ];

    let mut sinks = Vec::new();
    for (path, rotate, band) in targets {
        let Some(path) = set(path) else {
            continue;
        };
        let mut sink = FileSink::new(expand_path(path))
            .band(band)
            .compress(file.compress);
        if let Some(pattern) = set(rotate) {
            sink = sink.path_pattern(&expand_path(pattern).to_string_lossy())?;
        }
        if file.retention_secs > 0
            && let Some(root) = set(file.root.as_deref())
        {
            sink = sink
                .root(expand_path(root))
                .retention(Duration::from_secs(file.retention_secs));
        }
        sinks.push(sink);
    }

    if sinks.is_empty() {
        internal::warn("CONFIG", "File output enabled but no path configured");
    }
    let active: Vec<PathBuf> = sinks.iter().map(|s| s.path().to_path_buf()).collect();
    for sink in &mut sinks {
        for path in &active {
            sink.keep(path);
        }
    }
    Ok(sinks)
}

/// Older config files write `""` for an unused path.
fn set(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Logger {
    /// # Errors
    /// Invalid patterns or layout, or a sink that fails to open.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        internal::debug("LOGGER", "Building logger from config");
        Self::builder_from_config(config)?.build()
    }

    /// Loads `path` (TOML, or JSON by extension) and builds from it.
    ///
    /// # Errors
    /// Read or parse failures, then everything [`from_config`](Self::from_config) reports.
    pub fn from_config_file(path: &Path) -> Result<Self, Error> {
        let config = Config::load_from(path)?;
        internal::init_with_config(&config);
        Self::from_config(&config)
    }

    /// Builder preloaded from `config`, for callers that add their own sinks.
    ///
    /// # Errors
    /// [`Error::InvalidPattern`] for a rotation pattern that doesn't compile.
    pub fn builder_from_config(config: &Config) -> Result<LoggerBuilder, Error> {
        let mut builder = LoggerBuilder::new()
            .level(config.parse_level())
            .timestamp_format(config.general.timestamp_format.clone())
            .queue_capacity(config.general.queue_capacity)
            .buffer_capacity(config.general.buffer_capacity)
            .intervals(config.intervals());

        let mut enabled: Vec<String> = Vec::new();
        for sink in file_sinks(config)? {
            enabled.push(format!("file:{}", sink.path().display()));
            builder = builder.sink(sink);
        }
        if config.console.enabled {
            enabled.push("console".to_string());
            builder = builder.console().colors(config.console.colors).done();
        }

        if enabled.is_empty() {
            internal::warn("LOGGER", "No sinks enabled");
        } else {
            internal::debug(
                "LOGGER",
                &format!("Sinks enabled: [{}]", enabled.join(", ")),
            );
        }
        Ok(builder)
    }
}
