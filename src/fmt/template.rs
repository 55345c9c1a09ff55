//! Positional message templates.
//!
//! `{}` takes the next argument, `{N}` takes argument `N`, `{{` and `}}` are literal braces.
//! A placeholder with no matching argument, or any other `{...}` text, is emitted as written.
//! When a record carries no arguments the template is not interpreted at all, so literal text
//! containing braces survives untouched.

use super::value::Value;
use std::io::Write;

/// Appends `template` rendered against `args` to `out`.
pub fn render_into(out: &mut Vec<u8>, template: &str, args: &[Value<'_>]) {
    if args.is_empty() {
        out.extend_from_slice(template.as_bytes());
        return;
    }

    let bytes = template.as_bytes();
    let mut next_arg = 0;
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                out.extend_from_slice(&bytes[literal_start..=i]);
                i += 2;
                literal_start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                out.extend_from_slice(&bytes[literal_start..=i]);
                i += 2;
                literal_start = i;
            }
            b'{' => {
                let Some(close) = template[i + 1..].find('}') else {
                    break;
                };
                let end = i + 1 + close;
                let inner = &template[i + 1..end];
                if let Some(open) = inner.find('{') {
                    // Stray brace; the placeholder, if any, starts at the inner one.
                    i += 1 + open;
                    continue;
                }
                let index = if inner.is_empty() {
                    let idx = next_arg;
                    next_arg += 1;
                    Some(idx)
                } else {
                    inner.parse::<usize>().ok()
                };

                if let Some(arg) = index.and_then(|idx| args.get(idx)) {
                    out.extend_from_slice(&bytes[literal_start..i]);
                    // Writing into a Vec cannot fail.
                    let _ = write!(out, "{arg}");
                    literal_start = end + 1;
                }
                i = end + 1;
            }
            _ => i += 1,
        }
    }

    out.extend_from_slice(&bytes[literal_start..]);
}

/// Convenience for callers that want a `String` rather than bytes.
#[must_use]
pub fn render(template: &str, args: &[Value<'_>]) -> String {
    let mut out = Vec::with_capacity(template.len());
    render_into(&mut out, template, args);
    String::from_utf8_lossy(&out).into_owned()
}
