//! Type-directed rendering for template arguments and structured fields.
//!
//! Values borrow from the call site: a record is encoded on the producer's thread before
//! `submit` returns, so nothing here has to outlive the log call.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// One renderable argument.
#[derive(Clone)]
pub enum Value<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    /// Shortest decimal that round-trips, never in exponent form.
    Float(f64),
    /// Emitted raw, without quoting or escaping.
    Str(Cow<'a, str>),
    /// Rendered as `0x` followed by lowercase hex.
    Ptr(usize),
    /// Opaque object rendered through its own string conversion.
    Display(&'a dyn fmt::Display),
    /// Opaque object rendered through the generic `Debug` formatter.
    Debug(&'a dyn fmt::Debug),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Ptr(v) => write!(f, "0x{v:x}"),
            Self::Display(v) => write!(f, "{v}"),
            Self::Debug(v) => write!(f, "{v:?}"),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Ptr(v) => write!(f, "Ptr(0x{v:x})"),
            Self::Display(v) => f.debug_tuple("Display").field(&v.to_string()).finish(),
            Self::Debug(v) => f.debug_tuple("Debug").field(v).finish(),
        }
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(v: $t) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

value_from!(Int as i64: i8, i16, i32, i64);
value_from!(Uint as u64: u8, u16, u32, u64);
value_from!(Float as f64: f32, f64);

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<isize> for Value<'_> {
    fn from(v: isize) -> Self {
        // isize is at most 64 bits on every supported target.
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Value<'_> {
    fn from(v: usize) -> Self {
        Self::Uint(u64::try_from(v).unwrap_or(u64::MAX))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Self::Str(Cow::Borrowed(v))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(v: &'a String) -> Self {
        Self::Str(Cow::Borrowed(v.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(v: String) -> Self {
        Self::Str(Cow::Owned(v))
    }
}

impl From<Duration> for Value<'_> {
    /// Nanoseconds as an integer, saturating at `i64::MAX`.
    fn from(v: Duration) -> Self {
        Self::Int(i64::try_from(v.as_nanos()).unwrap_or(i64::MAX))
    }
}

impl<T> From<*const T> for Value<'_> {
    fn from(v: *const T) -> Self {
        Self::Ptr(v as usize)
    }
}

/// A key/value pair attached to a structured record. Insertion order is preserved on output.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub key: &'a str,
    pub value: Value<'a>,
}

impl<'a> Field<'a> {
    #[must_use]
    pub fn new(key: &'a str, value: impl Into<Value<'a>>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn bool(key: &'a str, value: bool) -> Self {
        Self {
            key,
            value: Value::Bool(value),
        }
    }

    #[must_use]
    pub const fn int(key: &'a str, value: i64) -> Self {
        Self {
            key,
            value: Value::Int(value),
        }
    }

    #[must_use]
    pub const fn uint(key: &'a str, value: u64) -> Self {
        Self {
            key,
            value: Value::Uint(value),
        }
    }

    #[must_use]
    pub const fn float64(key: &'a str, value: f64) -> Self {
        Self {
            key,
            value: Value::Float(value),
        }
    }

    #[must_use]
    pub const fn string(key: &'a str, value: &'a str) -> Self {
        Self {
            key,
            value: Value::Str(Cow::Borrowed(value)),
        }
    }

    #[must_use]
    pub const fn uintptr(key: &'a str, value: usize) -> Self {
        Self {
            key,
            value: Value::Ptr(value),
        }
    }

    #[must_use]
    pub fn duration(key: &'a str, value: Duration) -> Self {
        Self::new(key, value)
    }

    /// Standard-alphabet base64 with padding.
    #[must_use]
    pub fn base64(key: &'a str, value: &[u8]) -> Self {
        Self {
            key,
            value: Value::Str(Cow::Owned(STANDARD.encode(value))),
        }
    }

    #[must_use]
    pub const fn stringer(key: &'a str, value: &'a dyn fmt::Display) -> Self {
        Self {
            key,
            value: Value::Display(value),
        }
    }

    #[must_use]
    pub const fn object(key: &'a str, value: &'a dyn fmt::Debug) -> Self {
        Self {
            key,
            value: Value::Debug(value),
        }
    }
}
