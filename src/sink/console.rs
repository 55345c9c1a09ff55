//! Direct stdout delivery. Nothing to open, nothing buffered on our side.

use super::Sink;
use crate::error::Error;
use crate::fmt::Color;
use crate::pool::Encoded;
use std::io::{self, Write};

#[derive(Debug, Clone, Default)]
pub struct ConsoleSink {
    colors: bool,
}

impl ConsoleSink {
    #[must_use]
    pub const fn new() -> Self {
        Self { colors: false }
    }

    /// Wraps each line in its level's ANSI color.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Writes one record to `out`; split from `write` so tests can capture output.
    ///
    /// # Errors
    /// I/O errors from `out`.
    pub fn write_to(&self, out: &mut impl Write, record: &Encoded) -> Result<(), Error> {
        let bytes = record.as_bytes();
        if !self.colors {
            out.write_all(bytes)?;
            return Ok(());
        }
        // Keep the newline outside the escape so terminals don't carry color onto the next line.
        let (line, newline) = match bytes.split_last() {
            Some((b'\n', rest)) => (rest, true),
            _ => (bytes, false),
        };
        out.write_all(Color::for_level(record.level()).fg_ansi().as_bytes())?;
        out.write_all(line)?;
        out.write_all(Color::RESET.as_bytes())?;
        if newline {
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> String {
        "console".to_string()
    }

    fn init(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn write(&mut self, record: &Encoded) -> Result<(), Error> {
        self.write_to(&mut io::stdout().lock(), record)
    }
}
