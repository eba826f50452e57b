use thiserror::Error;

/// Errors raised while turning records into cursor tokens and back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The record could not be introspected, a key field was missing, or a
    /// field value has no textual representation.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// The token is not a well-formed cursor.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
