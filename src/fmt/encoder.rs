//! Turns a record into the single text line every sink receives:
//!
//! ```text
//! [timestamp] [LEVEL] [file:line] message{sep key=value}*\n
//! ```

use super::template;
use super::value::{Field, Value};
use crate::error::Error;
use crate::level::Level;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::Path;

/// Millisecond local time with numeric offset.
pub const DEFAULT_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// What follows the `[file:line]` prefix.
#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    /// Positional template; interpreted only when `args` is non-empty.
    Template {
        template: &'a str,
        args: &'a [Value<'a>],
    },
    /// Fixed message followed by `key=value` pairs.
    Fields {
        message: &'a str,
        fields: &'a [Field<'a>],
    },
}

/// One log event. Lives only for the duration of `encode`.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub time: DateTime<Local>,
    pub level: Level,
    /// Source path of the call site; only the file name is written.
    pub file: &'a str,
    pub line: u32,
    pub body: Body<'a>,
}

impl Record<'_> {
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self.body, Body::Fields { .. })
    }
}

/// Separator placed before each structured field.
#[must_use]
pub const fn field_separator(level: Level) -> &'static str {
    match level {
        Level::Public => "||",
        _ => " ",
    }
}

/// Holds the validated timestamp layout; shared by every producer.
#[derive(Debug, Clone)]
pub struct Encoder {
    layout: String,
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
        }
    }
}

impl Encoder {
    /// # Errors
    /// Returns [`Error::InvalidLayout`] if `layout` contains an unknown `%` specifier; chrono
    /// would otherwise fail every single format call at runtime.
    pub fn new(layout: impl Into<String>) -> Result<Self, Error> {
        let layout = layout.into();
        if StrftimeItems::new(&layout).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidLayout(layout));
        }
        Ok(Self { layout })
    }

    #[must_use]
    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// Appends the encoded line to `out`. Callers hand in a truncated buffer.
    pub fn encode(&self, record: &Record<'_>, out: &mut Vec<u8>) {
        // Writes into a Vec cannot fail; the layout was validated in `new`.
        out.push(b'[');
        let _ = write!(out, "{}", record.time.format(&self.layout));
        out.extend_from_slice(b"] [");
        out.extend_from_slice(record.level.label().as_bytes());
        out.extend_from_slice(b"] [");
        out.extend_from_slice(base_name(record.file).as_bytes());
        let _ = write!(out, ":{}] ", record.line);

        match record.body {
            Body::Template { template, args } => template::render_into(out, template, args),
            Body::Fields { message, fields } => {
                out.extend_from_slice(message.as_bytes());
                let sep = field_separator(record.level);
                for field in fields {
                    out.extend_from_slice(sep.as_bytes());
                    out.extend_from_slice(field.key.as_bytes());
                    out.push(b'=');
                    let _ = write!(out, "{}", field.value);
                }
            }
        }

        out.push(b'\n');
    }
}

fn base_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("src/net/conn.rs"), "conn.rs");
        assert_eq!(base_name("main.rs"), "main.rs");
    }

    #[test]
    fn unknown_specifier_is_rejected() {
        assert!(Encoder::new("%Y-%Q").is_err());
        assert!(Encoder::new("%Y-%m-%d %H:%M:%S").is_ok());
    }
}
