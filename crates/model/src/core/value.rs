use crate::core::data_type::DataType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, hash::Hash};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Boolean(bool),
    Json(serde_json::Value),
    Uuid(Uuid),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Null,
}

/// Raised when a value cannot be read as the requested Rust type.
#[derive(Debug, Error, PartialEq)]
#[error("expected {expected} value, found {found}")]
pub struct ValueTypeError {
    pub expected: DataType,
    pub found: String,
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        use Value::*;
        std::mem::discriminant(self).hash(state);
        match self {
            Int(v) => v.hash(state),
            Uint(v) => v.hash(state),
            Float(v) => {
                // Hash the bits of the float to handle NaN and -0.0 correctly
                let bits = v.to_bits();
                bits.hash(state);
            }
            String(v) => v.hash(state),
            Boolean(v) => v.hash(state),
            Json(v) => {
                let json_str = serde_json::to_string(v).unwrap_or_default();
                json_str.hash(state);
            }
            Uuid(v) => v.hash(state),
            Bytes(v) => v.hash(state),
            Timestamp(v) => v.hash(state),
            Null => {}
        }
    }
}

impl Value {
    /// Converts a structured value through its serde representation.
    pub fn structured<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
        serde_json::to_value(value).map(Value::Json)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Uint(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::String(v) => v.parse::<f64>().ok(),
            Value::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Json(v) => v.as_f64(),
            Value::Uuid(_) | Value::Bytes(_) | Value::Timestamp(_) | Value::Null => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Uint(v) => i64::try_from(*v).ok(),
            Value::String(v) => v.parse::<i64>().ok(),
            Value::Json(v) => v.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(v) => Some(*v),
            Value::Int(v) => u64::try_from(*v).ok(),
            Value::String(v) => v.parse::<u64>().ok(),
            Value::Json(v) => v.as_u64(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::Int(v) => Some(v.to_string()),
            Value::Uint(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::Boolean(v) => Some(v.to_string()),
            Value::Json(v) => v.as_str().map(|s| s.to_string()),
            Value::Uuid(v) => Some(v.to_string()),
            Value::Bytes(_) | Value::Timestamp(_) => None,
            Value::Null => Some("NULL".to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Int(v) => Some(*v != 0),
            Value::Uint(v) => Some(*v != 0),
            Value::Float(v) => Some(*v != 0.0),
            Value::String(v) => match v.to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Value::Boolean(v) => Some(*v),
            Value::Json(v) => v.as_bool(),
            Value::Uuid(_) | Value::Bytes(_) | Value::Timestamp(_) | Value::Null => None,
        }
    }

    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Uint(a), Uint(b)) => Some(a.cmp(b)),
            (Int(a), Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Uint(a), Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (Uint(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Uint(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (Bytes(a), Bytes(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// The natural data type of this value; `None` for `Null`.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Int(_) => Some(DataType::Int),
            Value::Uint(_) => Some(DataType::IntUnsigned),
            Value::Float(_) => Some(DataType::Float),
            Value::String(_) => Some(DataType::String),
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Json(_) => Some(DataType::Json),
            Value::Uuid(_) => Some(DataType::Uuid),
            Value::Bytes(_) => Some(DataType::Bytes),
            Value::Timestamp(_) => Some(DataType::Timestamp),
            Value::Null => None,
        }
    }

    /// Converts this value into `data_type`, parsing textual values when needed.
    ///
    /// Returns `None` when the value has no meaningful representation in the
    /// target type.
    pub fn coerce(self, data_type: DataType) -> Option<Value> {
        if self.data_type() == Some(data_type) {
            return Some(self);
        }

        match (data_type, self) {
            (_, Value::Null) => Some(Value::Null),
            (DataType::Int, v) => v.as_i64().map(Value::Int),
            (DataType::IntUnsigned, v) => v.as_u64().map(Value::Uint),
            (DataType::Float, Value::String(s)) => s.parse::<f64>().ok().map(Value::Float),
            (DataType::Float, v @ (Value::Int(_) | Value::Uint(_))) => v.as_f64().map(Value::Float),
            (DataType::Boolean, Value::String(s)) => s.parse::<bool>().ok().map(Value::Boolean),
            (DataType::String, v) => v.as_string().map(Value::String),
            (DataType::Uuid, Value::String(s)) => Uuid::parse_str(&s).ok().map(Value::Uuid),
            (DataType::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|ts| Value::Timestamp(ts.with_timezone(&Utc))),
            (DataType::Json, Value::String(s)) => serde_json::from_str(&s).ok().map(Value::Json),
            _ => None,
        }
    }

    fn kind_name(&self) -> String {
        self.data_type()
            .map(|t| t.name().to_string())
            .unwrap_or_else(|| "null".to_string())
    }

    fn mismatch(&self, expected: DataType) -> ValueTypeError {
        ValueTypeError {
            expected,
            found: self.kind_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Option<Value>,
    pub data_type: DataType,
}

impl FieldValue {
    pub fn new(name: &str, value: Option<Value>, data_type: DataType) -> Self {
        FieldValue {
            name: name.to_string(),
            value,
            data_type,
        }
    }

    /// The present value, or `None` when the field is absent or SQL `NULL`.
    pub fn present(&self) -> Option<&Value> {
        self.value.as_ref().filter(|v| **v != Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Uint(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace("'", "''")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Json(v) => {
                let json_str = v.to_string().replace('\'', "''");
                write!(f, "'{json_str}'")
            }
            Value::Uuid(v) => write!(f, "'{v}'"),
            Value::Bytes(v) => {
                let hex = v
                    .iter()
                    .fold(String::new(), |acc, byte: &u8| acc + &format!("{byte:02x}"));
                write!(f, "E'\\\\x{hex}'")
            }
            Value::Timestamp(v) => write!(f, "'{v}'"),
            Value::Null => write!(f, "NULL"),
        }
    }
}

macro_rules! value_conversions {
    ($($ty:ty => $variant:ident, $data_type:ident;)*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = ValueTypeError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(other.mismatch(DataType::$data_type)),
                    }
                }
            }
        )*
    };
}

value_conversions! {
    i64 => Int, Int;
    u64 => Uint, IntUnsigned;
    f64 => Float, Float;
    bool => Boolean, Boolean;
    String => String, String;
    Uuid => Uuid, Uuid;
    Vec<u8> => Bytes, Bytes;
    DateTime<Utc> => Timestamp, Timestamp;
    serde_json::Value => Json, Json;
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Value, ValueTypeError};
    use crate::core::data_type::DataType;
    use chrono::{TimeZone, Utc};
    use std::cmp::Ordering;

    #[test]
    fn test_compare_mixed_integers() {
        assert_eq!(Value::Int(-1).compare(&Value::Uint(0)), Some(Ordering::Less));
        assert_eq!(Value::Uint(5).compare(&Value::Int(5)), Some(Ordering::Equal));
        assert_eq!(Value::Int(3).compare(&Value::Float(2.5)), Some(Ordering::Greater));
    }

    #[test]
    fn test_compare_incompatible_kinds() {
        assert_eq!(Value::Int(1).compare(&Value::String("1".into())), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
    }

    #[test]
    fn test_coerce_legacy_strings() {
        assert_eq!(
            Value::String("123".into()).coerce(DataType::Int),
            Some(Value::Int(123))
        );
        assert_eq!(
            Value::String("123.45".into()).coerce(DataType::Float),
            Some(Value::Float(123.45))
        );
        assert_eq!(
            Value::String("true".into()).coerce(DataType::Boolean),
            Some(Value::Boolean(true))
        );
        assert_eq!(
            Value::String("2024-03-01T10:00:00Z".into()).coerce(DataType::Timestamp),
            Some(Value::Timestamp(
                Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
            ))
        );
        assert_eq!(Value::String("abc".into()).coerce(DataType::Int), None);
    }

    #[test]
    fn test_try_from_reports_mismatch() {
        let err = i64::try_from(Value::String("x".into())).unwrap_err();
        assert_eq!(
            err,
            ValueTypeError {
                expected: DataType::Int,
                found: "string".to_string(),
            }
        );
        assert_eq!(u64::try_from(Value::Uint(9)).unwrap(), 9);
    }

    #[test]
    fn test_structured_value() {
        #[derive(serde::Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let value = Value::structured(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value, Value::Json(serde_json::json!({"x": 1, "y": 2})));
    }
}
