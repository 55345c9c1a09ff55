//! Per-request logging context: a log ID plus detail pairs appended to every line.

use super::Logger;
use crate::fmt::{Value, list};
use crate::level::Level;
use std::fmt::Display;
use std::panic::Location;
use ulid::Ulid;

/// Time-sortable identifier for correlating the lines of one request.
#[must_use]
pub fn new_log_id() -> String {
    Ulid::new().to_string()
}

/// Lines render as `>>k=v||...||logID=<id>`: the call's pairs, then the stored details in
/// insertion order, then the log ID.
#[derive(Debug)]
pub struct LogContext<'l> {
    logger: &'l Logger,
    log_id: String,
    detail: Vec<(String, String)>,
}

impl<'l> LogContext<'l> {
    #[must_use]
    pub fn new(logger: &'l Logger, log_id: impl Into<String>) -> Self {
        Self {
            logger,
            log_id: log_id.into(),
            detail: Vec::new(),
        }
    }

    /// Context with a freshly generated ID.
    #[must_use]
    pub fn generate(logger: &'l Logger) -> Self {
        Self::new(logger, new_log_id())
    }

    #[must_use]
    pub fn log_id(&self) -> &str {
        &self.log_id
    }

    /// Adds a detail pair; setting an existing key replaces its value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        match self.detail.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.detail.push((key, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.set(key, value);
        self
    }

    #[track_caller]
    pub fn debug(&self, keys: &[&str], values: &[Value<'_>]) {
        self.log(Level::Debug, keys, values);
    }

    #[track_caller]
    pub fn info(&self, keys: &[&str], values: &[Value<'_>]) {
        self.log(Level::Info, keys, values);
    }

    #[track_caller]
    pub fn error(&self, keys: &[&str], values: &[Value<'_>]) {
        self.log(Level::Error, keys, values);
    }

    #[track_caller]
    pub fn log(&self, level: Level, keys: &[&str], values: &[Value<'_>]) {
        if !self.logger.enabled(level) {
            return;
        }
        let line = self.render(keys, values);
        self.logger.submit_line(level, Location::caller(), &line);
    }

    /// The line a call with these pairs would produce, without the record prefix.
    #[must_use]
    pub fn render(&self, keys: &[&str], values: &[Value<'_>]) -> String {
        if keys.len() != values.len() {
            return list::format_list(keys, values);
        }
        let mut pairs: Vec<(String, String)> = keys
            .iter()
            .zip(values)
            .map(|(k, v)| ((*k).to_string(), v.to_string()))
            .collect();
        pairs.extend(self.detail.iter().cloned());
        pairs.push(("logID".to_string(), self.log_id.clone()));
        list::format_context(&pairs)
    }
}
