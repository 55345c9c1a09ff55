//! Labeled key/value lists: the parallel-slice logging form used by request handlers that
//! collect keys and values separately.

use super::value::Value;
use std::fmt::Write;

const LIST_SEPARATOR: &str = "||";

/// `=> k1=v1||k2=v2`, or ` keys=[..]||values=[..]` when the slices disagree in length so
/// the mismatch is visible in the log rather than silently truncated.
#[must_use]
pub fn format_list(keys: &[&str], values: &[Value<'_>]) -> String {
    if keys.len() != values.len() {
        return mismatch(keys, values);
    }
    let mut out = String::from("=> ");
    for (i, (key, value)) in keys.iter().zip(values).enumerate() {
        push_pair(&mut out, i, key, value);
    }
    out
}

/// Context form: `>>k1=v1||k2=v2`, pairs already rendered.
#[must_use]
pub fn format_context(pairs: &[(String, String)]) -> String {
    let mut out = String::from(">>");
    for (i, (key, value)) in pairs.iter().enumerate() {
        push_pair(&mut out, i, key, value);
    }
    out
}

fn push_pair(out: &mut String, index: usize, key: &str, value: &dyn std::fmt::Display) {
    if index > 0 {
        out.push_str(LIST_SEPARATOR);
    }
    let _ = write!(out, "{key}={value}");
}

fn mismatch(keys: &[&str], values: &[Value<'_>]) -> String {
    let values: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!(
        " keys=[{}]{LIST_SEPARATOR}values=[{}]",
        keys.join(" "),
        values.join(" ")
    )
}
