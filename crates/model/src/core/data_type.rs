use crate::core::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Seconds between the Unix epoch and `0001-01-01T00:00:00Z`.
const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// Declared kind of a record field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int,
    IntUnsigned,
    Float,
    String,
    Timestamp,
    Bytes,
    Json,
    Uuid,
}

impl DataType {
    /// The value an absent optional field of this type is encoded as.
    pub fn zero_value(&self) -> Value {
        match self {
            DataType::Boolean => Value::Boolean(false),
            DataType::Int => Value::Int(0),
            DataType::IntUnsigned => Value::Uint(0),
            DataType::Float => Value::Float(0.0),
            DataType::String => Value::String(String::new()),
            DataType::Timestamp => Value::Timestamp(zero_timestamp()),
            DataType::Bytes => Value::Bytes(Vec::new()),
            DataType::Json => Value::Json(serde_json::Value::Null),
            DataType::Uuid => Value::Uuid(Uuid::nil()),
        }
    }

    pub fn is_zero(&self, value: &Value) -> bool {
        *value == self.zero_value()
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int => "int",
            DataType::IntUnsigned => "unsigned int",
            DataType::Float => "float",
            DataType::String => "string",
            DataType::Timestamp => "timestamp",
            DataType::Bytes => "bytes",
            DataType::Json => "json",
            DataType::Uuid => "uuid",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `0001-01-01T00:00:00Z`, the zero timestamp.
pub fn zero_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIMESTAMP_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}
