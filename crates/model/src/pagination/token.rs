//! Opaque cursor tokens.
//!
//! A token is the standard base64 encoding of `text?TAG` pieces joined by
//! commas. This module owns the envelope only; the per-kind text forms live in
//! the codec.

use crate::pagination::error::CodecError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub(crate) const FIELD_SEPARATOR: char = ',';
pub(crate) const TAG_SEPARATOR: char = '?';

/// An opaque, immutable pagination token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Wraps `text?TAG` pieces into a token.
    pub(crate) fn seal(fields: &[String]) -> Self {
        let joined = fields.join(&FIELD_SEPARATOR.to_string());
        Token(STANDARD.encode(joined.as_bytes()))
    }

    /// Unwraps a token into its `(text, tag)` pieces, in key order.
    pub(crate) fn open(&self) -> Result<Vec<(String, String)>, CodecError> {
        let bytes = STANDARD
            .decode(self.0.trim())
            .map_err(|e| CodecError::InvalidToken(format!("not base64: {e}")))?;
        let payload = String::from_utf8(bytes)
            .map_err(|_| CodecError::InvalidToken("payload is not UTF-8".to_string()))?;

        if payload.is_empty() {
            return Err(CodecError::InvalidToken("token is empty".to_string()));
        }

        split_fields(&payload)
            .into_iter()
            .map(|field| {
                let sep = field.rfind(TAG_SEPARATOR).ok_or_else(|| {
                    CodecError::InvalidToken(format!("field '{field}' has no kind tag"))
                })?;
                Ok((field[..sep].to_string(), field[sep + 1..].to_string()))
            })
            .collect()
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token(s)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token(s.to_string())
    }
}

impl FromStr for Token {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Token(s.to_string()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits a payload on commas, keeping commas that belong to a value.
///
/// A piece only ends a field when its text after the last `?` looks like a
/// kind tag (an ASCII uppercase letter followed by uppercase letters or
/// digits). Otherwise the comma was
/// part of the value and the piece is joined with the next one.
fn split_fields(payload: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;

    for (idx, _) in payload.match_indices(FIELD_SEPARATOR) {
        let candidate = &payload[start..idx];
        if ends_with_tag(candidate) {
            fields.push(candidate);
            start = idx + 1;
        }
    }

    fields.push(&payload[start..]);
    fields
}

fn ends_with_tag(piece: &str) -> bool {
    match piece.rfind(TAG_SEPARATOR) {
        Some(sep) => {
            let tag = &piece[sep + 1..];
            tag.bytes().next().is_some_and(|b| b.is_ascii_uppercase())
                && tag
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        None => false,
    }
}
