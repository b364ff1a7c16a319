use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// A single value inside a content document.
///
/// The serde representation is tagged so timestamps survive a round trip
/// through a store that only keeps JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Plain JSON for callers: timestamps become ISO-8601 strings.
    pub fn to_canonical_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Timestamp(ts) => Value::String(format_timestamp(ts)),
        }
    }

    /// Accepts JSON strings and numbers coming from an admin client.
    pub fn from_json(name: &str, value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(Self::Number).ok_or_else(|| {
                DomainError::invalid_input(format!("Field '{}' is not a finite number", name))
            }),
            other => Err(DomainError::invalid_input(format!(
                "Field '{}' must be a string or a number, got {}",
                name,
                json_kind(other)
            ))),
        }
    }

    /// Parses the right-hand side of a `name=value` pair. Only JSON number
    /// syntax becomes a number, so `007` or `0049...` stay text; wrap a
    /// value in double quotes to force text.
    pub fn parse_literal(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(Value::String(s)) => Self::Text(s),
            Ok(Value::Number(n)) => match n.as_f64() {
                Some(n) if n.is_finite() => Self::Number(n),
                _ => Self::Text(raw.to_string()),
            },
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Numbers must be finite to be stored as JSON.
    pub fn validate(&self, name: &str) -> Result<(), DomainError> {
        match self {
            Self::Number(n) if !n.is_finite() => Err(DomainError::invalid_input(format!(
                "Field '{}' is not a finite number",
                name
            ))),
            _ => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
        Value::String(_) => "a string",
        Value::Number(_) => "a number",
    }
}
