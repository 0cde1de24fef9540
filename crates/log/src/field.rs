//! Structured fields attached to log records.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// A key/value pair attached to a record, distinct from the free-text
/// message.
///
/// Values are converted to JSON eagerly, at construction, so emission never
/// has to deal with serialization failures. A value that cannot be converted
/// is stored as JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) key: String,
    pub(crate) value: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldValue {
    Json(Value),
    /// Rendered through the encoder's duration rule.
    Duration(Duration),
}

impl Field {
    /// Build a field from any serializable value.
    pub fn new(key: impl Into<String>, value: impl Serialize) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Json(serde_json::to_value(value).unwrap_or(Value::Null)),
        }
    }

    /// A duration field, rendered per the encoder's duration rule rather
    /// than as a plain number.
    #[must_use]
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Duration(value),
        }
    }

    pub(crate) fn from_value(key: String, value: Value) -> Self {
        Self {
            key,
            value: FieldValue::Json(value),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}
