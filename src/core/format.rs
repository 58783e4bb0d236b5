//! Plain-text line formatting
//!
//! One record becomes exactly one line:
//!
//! ```text
//! [time ]LVL [file:line ][[group.prefix] ]message[ key=value]*\n
//! ```
//!
//! Handler-bound attributes come before the record's own attributes. Groups
//! inside attribute values render as `key={a=1 b=2}`; the handler's group
//! prefix is only a label and never qualifies attribute keys.

use super::record::Record;
use super::timestamp::TimestampFormat;
use super::value::{Attr, Value};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use colored::Colorize;
use std::fmt::Write;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFormatter {
    pub timestamp_format: TimestampFormat,
    /// Render the `file:line` column when the record carries a source
    pub add_source: bool,
    /// Color the level code (console only)
    pub colors: bool,
}

impl LineFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Render `record` with the handler's group `prefix` and `bound` attributes
    pub fn format(&self, record: &Record, prefix: &str, bound: &[Attr]) -> String {
        let mut buf = String::with_capacity(128);

        if let Some(ref timestamp) = record.timestamp {
            buf.push_str(&self.timestamp_format.format(timestamp));
            buf.push(' ');
        }

        let level = match record.level.code() {
            Some(code) => code.to_string(),
            None => record.level.to_string(),
        };
        if self.colors {
            let _ = write!(buf, "{}", level.color(record.level.color_code()));
        } else {
            buf.push_str(&level);
        }
        buf.push(' ');

        if self.add_source {
            if let Some(ref source) = record.source {
                if !source.file.is_empty() {
                    let file = Path::new(source.file.as_ref())
                        .file_name()
                        .and_then(|name| name.to_str())
                        .unwrap_or(source.file.as_ref());
                    let _ = write!(buf, "{}:{} ", file, source.line);
                }
            }
        }

        if !prefix.is_empty() {
            let _ = write!(buf, "[{}] ", prefix);
        }

        push_sanitized(&mut buf, &record.message);

        for attr in bound.iter().chain(record.attrs()) {
            if attr.value.is_empty_group() {
                continue;
            }
            buf.push(' ');
            append_attr(&mut buf, attr);
        }

        buf.push('\n');
        buf
    }
}

/// Escape line breaks and tabs so a message can never span lines
fn push_sanitized(buf: &mut String, message: &str) {
    for c in message.chars() {
        match c {
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            _ => buf.push(c),
        }
    }
}

/// RFC 3339 with up to nanosecond precision, trailing zeros trimmed
fn push_time(buf: &mut String, t: &DateTime<FixedOffset>) {
    let text = t.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let Some(dot) = text.find('.') else {
        buf.push_str(&text);
        return;
    };
    let end = text[dot + 1..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |i| dot + 1 + i);
    let fraction = text[dot + 1..end].trim_end_matches('0');

    buf.push_str(&text[..dot]);
    if !fraction.is_empty() {
        buf.push('.');
        buf.push_str(fraction);
    }
    buf.push_str(&text[end..]);
}

fn append_attr(buf: &mut String, attr: &Attr) {
    buf.push_str(&attr.key);
    buf.push('=');
    append_value(buf, &attr.value);
}

fn append_value(buf: &mut String, value: &Value) {
    match value {
        Value::String(s) => {
            let _ = write!(buf, "{:?}", s);
        }
        Value::Time(t) => push_time(buf, t),
        Value::Group(attrs) => {
            buf.push('{');
            let mut first = true;
            for attr in attrs.iter().filter(|a| !a.value.is_empty_group()) {
                if !first {
                    buf.push(' ');
                }
                first = false;
                append_attr(buf, attr);
            }
            buf.push('}');
        }
        Value::Int(i) => {
            let _ = write!(buf, "{}", i);
        }
        Value::Uint(u) => {
            let _ = write!(buf, "{}", u);
        }
        Value::Float(f) => {
            let _ = write!(buf, "{}", f);
        }
        Value::Bool(b) => {
            let _ = write!(buf, "{}", b);
        }
        Value::Duration(d) => {
            let _ = write!(buf, "{:?}", d);
        }
        Value::Any(v) => {
            let _ = write!(buf, "{}", v);
        }
    }
}
