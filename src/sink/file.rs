//! Buffered file sink with time-based rotation and age-based deletion.
//!
//! Lifecycle: `new` (unopened) → `init` opens the active file for append behind a buffered
//! writer → `write` appends records inside the sink's severity band → `rotate` archives the
//! active file under the previous window's path once a pattern component changes, then reopens
//! a fresh file at the same active path.

use super::compress::compress_file;
use super::pattern::PathPattern;
use super::retention::{DeleteReport, delete_expired};
use super::{Capabilities, Sink};
use crate::error::Error;
use crate::internal;
use crate::level::{Level, LevelBand};
use crate::pool::Encoded;
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Size of the in-memory write buffer in front of the file.
pub const DEFAULT_WRITE_BUFFER: usize = 8192;

#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    pattern: Option<PathPattern>,
    band: LevelBand,
    retention: Option<Duration>,
    root: Option<PathBuf>,
    compress: bool,
    buffer_size: usize,
    /// Other sinks' active files under the same root.
    kept: Vec<PathBuf>,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    /// Unopened sink for `path`, accepting every level.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pattern: None,
            band: LevelBand::all(),
            retention: None,
            root: None,
            compress: false,
            buffer_size: DEFAULT_WRITE_BUFFER,
            kept: Vec::new(),
            writer: None,
        }
    }

    /// Lowest level written, inclusive.
    #[must_use]
    pub const fn floor(mut self, level: Level) -> Self {
        self.band.floor = level;
        self
    }

    /// Highest level written, inclusive.
    #[must_use]
    pub const fn ceil(mut self, level: Level) -> Self {
        self.band.ceil = level;
        self
    }

    #[must_use]
    pub const fn band(mut self, band: LevelBand) -> Self {
        self.band = band;
        self
    }

    /// Files under the retention root older than this are removed by `delete`.
    #[must_use]
    pub const fn retention(mut self, retention: Duration) -> Self {
        self.retention = Some(retention);
        self
    }

    /// Directory scanned by `delete`.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Gzip each archive right after rotation.
    #[must_use]
    pub const fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use]
    pub const fn buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    /// Builder form of [`set_path_pattern`](Self::set_path_pattern).
    ///
    /// # Errors
    /// [`Error::InvalidPattern`] if the pattern does not compile.
    pub fn path_pattern(mut self, pattern: &str) -> Result<Self, Error> {
        self.set_path_pattern(pattern)?;
        Ok(self)
    }

    /// Compiles the archive path pattern and samples the current window.
    ///
    /// # Errors
    /// [`Error::InvalidPattern`] if the pattern does not compile; the previous pattern stays.
    pub fn set_path_pattern(&mut self, pattern: &str) -> Result<(), Error> {
        self.set_path_pattern_at(pattern, &Local::now())
    }

    /// [`set_path_pattern`](Self::set_path_pattern) against an explicit clock reading.
    ///
    /// # Errors
    /// [`Error::InvalidPattern`] if the pattern does not compile.
    pub fn set_path_pattern_at(&mut self, pattern: &str, now: &DateTime<Local>) -> Result<(), Error> {
        self.pattern = Some(PathPattern::compile(pattern, now)?);
        Ok(())
    }

    /// Adds a path the retention pass must skip, typically another sink's active file.
    pub fn keep(&mut self, path: &Path) {
        if path != self.path && !self.kept.iter().any(|p| p == path) {
            self.kept.push(path.to_path_buf());
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn level_band(&self) -> LevelBand {
        self.band
    }

    #[must_use]
    pub const fn pattern(&self) -> Option<&PathPattern> {
        self.pattern.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn open(&mut self) -> Result<(), Error> {
        ensure_parent(&self.path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.writer = Some(BufWriter::with_capacity(self.buffer_size, file));
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Rotation against an explicit clock reading. Returns the archive path when a boundary
    /// was crossed.
    ///
    /// # Errors
    /// Flush, rename, or reopen failures. The sink is reopened even when the rename fails so
    /// later records still have somewhere to go.
    pub fn rotate_at(&mut self, now: &DateTime<Local>) -> Result<Option<PathBuf>, Error> {
        let Some(archive) = self.pattern.as_mut().and_then(|p| p.advance(now)) else {
            return Ok(None);
        };
        if self.writer.is_none() {
            // Never opened: nothing to archive yet.
            return Ok(None);
        }

        let closed = self.close();
        let renamed = ensure_parent(&archive)
            .and_then(|()| fs::rename(&self.path, &archive).map_err(Error::from));
        self.open()?;
        closed?;
        renamed?;

        internal::debug(
            "FILE",
            &format!("Rotated {} -> {}", self.path.display(), archive.display()),
        );

        if self.compress {
            match compress_file(&archive) {
                Ok(gz) => return Ok(Some(gz)),
                Err(e) => internal::warn(
                    "FILE",
                    &format!("Failed to compress {}: {e}", archive.display()),
                ),
            }
        }
        Ok(Some(archive))
    }

    /// Retention pass against an explicit clock reading. Neither the active file nor any path
    /// added with [`keep`](Self::keep) is ever deleted.
    ///
    /// # Errors
    /// Failure to list the retention root.
    pub fn delete_at(&self, now: SystemTime) -> Result<DeleteReport, Error> {
        let (Some(root), Some(retention)) = (&self.root, self.retention) else {
            return Ok(DeleteReport::default());
        };
        let keep: Vec<&Path> = std::iter::once(self.path.as_path())
            .chain(self.kept.iter().map(PathBuf::as_path))
            .collect();
        delete_expired(root, retention, now, &keep)
    }
}

fn ensure_parent(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
        internal::debug("FILE", &format!("Created directory: {}", parent.display()));
    }
    Ok(())
}

impl Sink for FileSink {
    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn init(&mut self) -> Result<(), Error> {
        self.open()
    }

    fn write(&mut self, record: &Encoded) -> Result<(), Error> {
        if !self.band.contains(record.level()) {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Err(Error::SinkNotOpen(self.path.clone()));
        };
        writer.write_all(record.as_bytes())?;
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::FLUSH;
        if self.pattern.as_ref().is_some_and(|p| !p.is_literal()) {
            caps = caps | Capabilities::ROTATE;
        }
        if self.root.is_some() && self.retention.is_some() {
            caps = caps | Capabilities::DELETE;
        }
        caps
    }

    fn flush(&mut self) -> Result<(), Error> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn rotate(&mut self) -> Result<(), Error> {
        self.rotate_at(&Local::now()).map(|_| ())
    }

    fn delete(&mut self) -> Result<(), Error> {
        self.delete_at(SystemTime::now()).map(|_| ())
    }

    fn active_path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn protect_path(&mut self, path: &Path) {
        self.keep(path);
    }
}
