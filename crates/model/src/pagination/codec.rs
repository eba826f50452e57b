//! Field codec: turns the key fields of a record into a cursor token and back.

use crate::{
    core::value::{FieldValue, Value},
    pagination::{
        error::CodecError,
        kind::FieldKind,
        token::{FIELD_SEPARATOR, Token},
    },
    records::record::{FieldSpec, Record, RecordError, find_spec},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// How the codec treats a `TIME` field it cannot parse.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Substitute the current time and keep going. Compatible with tokens
    /// issued by older encoders, but resuming from "now" can skip or repeat
    /// rows.
    #[default]
    Lenient,

    /// Reject the token with `InvalidToken`.
    Strict,
}

/// Encodes and decodes the composite key of a record.
///
/// The codec holds no state besides its decode mode and is safe to share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCodec {
    mode: DecodeMode,
}

impl FieldCodec {
    pub fn new(mode: DecodeMode) -> Self {
        Self { mode }
    }

    pub fn strict() -> Self {
        Self::new(DecodeMode::Strict)
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Encodes the fields named by `keys`, in order, into a token.
    ///
    /// Absent optional fields are written as the zero value of their type.
    pub fn encode<R: Record + ?Sized>(&self, record: &R, keys: &[String]) -> Result<Token, CodecError> {
        if keys.is_empty() {
            return Err(CodecError::InvalidModel(
                "no key fields to encode".to_string(),
            ));
        }

        let fields = keys
            .iter()
            .map(|key| {
                let field = record
                    .field(key)
                    .map_err(|e| model_error(record.entity(), e))?;
                encode_field(&field)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Token::seal(&fields))
    }

    /// Encodes bare values. `Value::Null` has no encoding and is rejected.
    pub fn encode_values(&self, values: &[Value]) -> Result<Token, CodecError> {
        let fields = values
            .iter()
            .map(encode_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Token::seal(&fields))
    }

    /// Decodes a token into its values, in the order they were encoded.
    pub fn decode(&self, token: &Token) -> Result<Vec<Value>, CodecError> {
        token
            .open()?
            .into_iter()
            .map(|(text, tag)| self.decode_field(text, &tag))
            .collect()
    }

    /// Decodes a token and pairs each value with its key name.
    ///
    /// A token carrying fewer values than `keys` yields only the values it
    /// has.
    pub fn decode_named(
        &self,
        token: &Token,
        keys: &[String],
    ) -> Result<Vec<(String, Value)>, CodecError> {
        let values = self.decode(token)?;
        Ok(keys.iter().cloned().zip(values).collect())
    }

    /// Decodes a token and converts each value into the declared type of its
    /// field. Tokens written by the original format tag every non-time value
    /// as `STRING`; this is where those values regain their type.
    pub fn decode_typed(
        &self,
        token: &Token,
        keys: &[String],
        specs: &[FieldSpec],
    ) -> Result<Vec<(String, Value)>, CodecError> {
        self.decode_named(token, keys)?
            .into_iter()
            .map(|(key, value)| {
                let spec = find_spec(specs, &key).ok_or_else(|| {
                    CodecError::InvalidModel(format!("unknown key field '{key}'"))
                })?;
                let value = value.coerce(spec.data_type).ok_or_else(|| {
                    CodecError::InvalidToken(format!(
                        "value for '{}' is not a valid {}",
                        spec.name, spec.data_type
                    ))
                })?;
                Ok((spec.name.clone(), value))
            })
            .collect()
    }

    /// Decodes a token and writes the values into `record` by name.
    ///
    /// Nullable fields that decode to the zero value of their type are left
    /// `None`: the token format cannot tell an explicit zero from an absent
    /// value.
    pub fn decode_into<R: Record + ?Sized>(
        &self,
        token: &Token,
        keys: &[String],
        record: &mut R,
    ) -> Result<(), CodecError> {
        let specs = record.field_specs();

        for (name, value) in self.decode_typed(token, keys, &specs)? {
            let nullable_zero = find_spec(&specs, &name)
                .is_some_and(|spec| spec.nullable && spec.data_type.is_zero(&value));
            let value = if nullable_zero { None } else { Some(value) };

            record
                .set_field(&name, value)
                .map_err(|e| model_error(record.entity(), e))?;
        }

        Ok(())
    }

    fn decode_field(&self, text: String, tag: &str) -> Result<Value, CodecError> {
        let Some(kind) = FieldKind::from_tag(tag) else {
            debug!(tag, "Unknown field kind in cursor, decoding as string");
            return Ok(Value::String(text));
        };

        let value = match kind {
            FieldKind::String => Value::String(text),
            FieldKind::String64 => Value::String(decode_text(kind, &text)?),
            FieldKind::Time => match parse_timestamp(&text) {
                Ok(ts) => Value::Timestamp(ts),
                Err(e) => match self.mode {
                    DecodeMode::Lenient => {
                        warn!(value = %text, error = %e, "Malformed timestamp in cursor, substituting current time");
                        Value::Timestamp(Utc::now())
                    }
                    DecodeMode::Strict => {
                        return Err(invalid_value(kind, &text));
                    }
                },
            },
            FieldKind::Bool => Value::Boolean(text.parse().map_err(|_| invalid_value(kind, &text))?),
            FieldKind::Int => Value::Int(text.parse().map_err(|_| invalid_value(kind, &text))?),
            FieldKind::Uint => Value::Uint(text.parse().map_err(|_| invalid_value(kind, &text))?),
            FieldKind::Float => Value::Float(text.parse().map_err(|_| invalid_value(kind, &text))?),
            FieldKind::Bytes => {
                Value::Bytes(STANDARD.decode(&text).map_err(|_| invalid_value(kind, &text))?)
            }
            FieldKind::Json => {
                Value::Json(serde_json::from_str(&text).map_err(|_| invalid_value(kind, &text))?)
            }
            FieldKind::Json64 => {
                let json = decode_text(kind, &text)?;
                Value::Json(serde_json::from_str(&json).map_err(|_| invalid_value(kind, &text))?)
            }
            FieldKind::Uuid => Value::Uuid(Uuid::parse_str(&text).map_err(|_| invalid_value(kind, &text))?),
        };

        Ok(value)
    }
}

fn encode_field(field: &FieldValue) -> Result<String, CodecError> {
    match field.present() {
        Some(value) => encode_value(value),
        None => encode_value(&field.data_type.zero_value()),
    }
}

fn encode_value(value: &Value) -> Result<String, CodecError> {
    let (text, kind) = match value {
        Value::String(s) if s.contains(FIELD_SEPARATOR) => {
            (STANDARD.encode(s.as_bytes()), FieldKind::String64)
        }
        Value::String(s) => (s.clone(), FieldKind::String),
        Value::Timestamp(ts) => (
            ts.to_rfc3339_opts(SecondsFormat::Nanos, true),
            FieldKind::Time,
        ),
        Value::Boolean(b) => (b.to_string(), FieldKind::Bool),
        Value::Int(i) => (i.to_string(), FieldKind::Int),
        Value::Uint(u) => (u.to_string(), FieldKind::Uint),
        Value::Float(f) => (f.to_string(), FieldKind::Float),
        Value::Bytes(b) => (STANDARD.encode(b), FieldKind::Bytes),
        Value::Json(j) => {
            let json = serde_json::to_string(j)
                .map_err(|e| CodecError::InvalidModel(format!("json value: {e}")))?;
            if json.contains(FIELD_SEPARATOR) {
                (STANDARD.encode(json.as_bytes()), FieldKind::Json64)
            } else {
                (json, FieldKind::Json)
            }
        }
        Value::Uuid(u) => (u.hyphenated().to_string(), FieldKind::Uuid),
        Value::Null => {
            return Err(CodecError::InvalidModel(
                "null has no textual representation".to_string(),
            ));
        }
    };

    Ok(format!("{text}?{}", kind.tag()))
}

/// RFC 3339 first; chrono's relaxed form covers years past 9999, which
/// are written with a sign.
fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .or_else(|_| text.parse::<DateTime<Utc>>())
}

fn decode_text(kind: FieldKind, text: &str) -> Result<String, CodecError> {
    STANDARD
        .decode(text)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| invalid_value(kind, text))
}

fn invalid_value(kind: FieldKind, text: &str) -> CodecError {
    CodecError::InvalidToken(format!("'{text}' is not a valid {} value", kind.tag()))
}

fn model_error(entity: &str, err: RecordError) -> CodecError {
    match err {
        RecordError::UnknownField(field) => {
            CodecError::InvalidModel(format!("{entity} has no field '{field}'"))
        }
        other => CodecError::InvalidModel(other.to_string()),
    }
}
