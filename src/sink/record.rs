//! Ordered key-value log records.

use std::fmt;

use serde::Serialize;

/// A single value in a log record.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Nil,
    Uint(u64),
    Str(String),
    /// Structured value, rendered as compact JSON.
    Json(serde_json::Value),
}

impl LogValue {
    /// Capture a serializable value as structured JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => LogValue::Json(json),
            Err(e) => LogValue::Str(format!("!ERROR {e}")),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            LogValue::Uint(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        LogValue::Str(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        LogValue::Str(value)
    }
}

impl From<u64> for LogValue {
    fn from(value: u64) -> Self {
        LogValue::Uint(value)
    }
}

impl From<usize> for LogValue {
    fn from(value: usize) -> Self {
        LogValue::Uint(value as u64)
    }
}

/// Quote a logfmt value when it would otherwise be ambiguous.
///
/// Quoted values use JSON string escaping.
fn write_logfmt_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let needs_quotes = s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"');
    if needs_quotes {
        let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
        f.write_str(&quoted)
    } else {
        f.write_str(s)
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Nil => f.write_str("null"),
            LogValue::Uint(n) => write!(f, "{n}"),
            LogValue::Str(s) => write_logfmt_str(f, s),
            LogValue::Json(json) => write_logfmt_str(f, &json.to_string()),
        }
    }
}

/// One structured log emission: an ordered sequence of key-value pairs.
///
/// Keys may repeat; lookups return the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    fields: Vec<(&'static str, LogValue)>,
}

impl LogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field, builder style.
    pub fn with(mut self, key: &'static str, value: impl Into<LogValue>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<LogValue>) {
        self.fields.push((key, value.into()));
    }

    /// Append all of `fields` in order.
    pub fn extend(&mut self, fields: impl IntoIterator<Item = (&'static str, LogValue)>) {
        self.fields.extend(fields);
    }

    pub fn get(&self, key: &str) -> Option<&LogValue> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(k, _)| *k)
    }

    pub fn fields(&self) -> &[(&'static str, LogValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
