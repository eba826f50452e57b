use model::pagination::error::CodecError;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("Cursor error: {0}")]
    Codec(#[from] CodecError),

    #[error("Key '{0}' appears more than once")]
    DuplicateKey(String),

    #[error("Entity '{entity}' has no field '{key}'")]
    UnknownKey { entity: String, key: String },

    #[error("Cursor carries {found} values but {expected} keys were requested")]
    TokenArity { expected: usize, found: usize },

    /// Error raised by the storage collaborator, passed through as-is.
    #[error("Storage error: {0}")]
    Source(#[source] Box<dyn Error + Send + Sync>),
}

impl PaginationError {
    pub fn source_error<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        PaginationError::Source(Box::new(err))
    }
}
