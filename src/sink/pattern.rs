//! Rotation path patterns.
//!
//! `%Y` year, `%M` month, `%D` day, `%H` hour, `%m` minute. A pattern is compiled once into
//! the ordered list of components it references and a template of literals and slots. The
//! component values are sampled at compile time; every later [`PathPattern::advance`]
//! re-samples them and, if any position changed, returns the path for the window that just
//! ended.

use crate::error::Error;
use chrono::{DateTime, Datelike, TimeZone, Timelike};
use std::fmt::Write;
use std::path::PathBuf;

/// A time-derived path component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl Component {
    const fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'Y' => Some(Self::Year),
            b'M' => Some(Self::Month),
            b'D' => Some(Self::Day),
            b'H' => Some(Self::Hour),
            b'm' => Some(Self::Minute),
            _ => None,
        }
    }

    /// Current value of this component at `now`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn extract<Tz: TimeZone>(self, now: &DateTime<Tz>) -> i32 {
        match self {
            Self::Year => now.year(),
            Self::Month => now.month() as i32,
            Self::Day => now.day() as i32,
            Self::Hour => now.hour() as i32,
            Self::Minute => now.minute() as i32,
        }
    }

    /// Minimum rendered width; shorter values are zero-padded.
    const fn width(self) -> usize {
        match self {
            Self::Year => 0,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Index into the component/value lists.
    Slot(usize),
}

#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    components: Vec<Component>,
    values: Vec<i32>,
}

impl PathPattern {
    /// Compiles `pattern` and samples its components at `now`.
    ///
    /// # Errors
    /// [`Error::InvalidPattern`] for an unknown variable character or a trailing `%`.
    pub fn compile<Tz: TimeZone>(pattern: &str, now: &DateTime<Tz>) -> Result<Self, Error> {
        let invalid = |reason: String| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut components = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices();

        while let Some((pos, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let Some((_, var)) = chars.next() else {
                return Err(invalid(format!("dangling '%' at offset {pos}")));
            };
            let component = u8::try_from(var)
                .ok()
                .and_then(Component::from_byte)
                .ok_or_else(|| invalid(format!("unknown variable '%{var}' at offset {pos}")))?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Slot(components.len()));
            components.push(component);
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let values = components.iter().map(|c| c.extract(now)).collect();
        Ok(Self {
            source: pattern.to_string(),
            segments,
            components,
            values,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Without variables the pattern is a fixed path and never triggers rotation.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.components.is_empty()
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Values sampled by the last compile or boundary crossing.
    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Renders the template against `values`, positionally.
    #[must_use]
    pub fn render(&self, values: &[i32]) -> PathBuf {
        let mut out = String::with_capacity(self.source.len() + 8);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(index) => {
                    let width = self.components[*index].width();
                    let value = values.get(*index).copied().unwrap_or_default();
                    let _ = write!(out, "{value:0width$}");
                }
            }
        }
        PathBuf::from(out)
    }

    /// Path for the stored window.
    #[must_use]
    pub fn current_path(&self) -> PathBuf {
        self.render(&self.values)
    }

    /// Re-samples every component at `now`. If any value differs from the stored one, stores
    /// the new values and returns the path rendered from the *previous* window, which is where
    /// the file written so far belongs.
    pub fn advance<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Option<PathBuf> {
        let fresh: Vec<i32> = self.components.iter().map(|c| c.extract(now)).collect();
        if fresh == self.values {
            return None;
        }
        let previous = std::mem::replace(&mut self.values, fresh);
        Some(self.render(&previous))
    }
}
