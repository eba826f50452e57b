use model::records::record::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemorySourceError {
    /// The source holds no records for this entity.
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// A record could not be read while evaluating the query.
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// The query uses an expression the evaluator does not support.
    #[error("Unsupported expression: {0}")]
    UnsupportedExpr(String),
}

#[derive(Debug, Error)]
pub enum SqlSourceError<E>
where
    E: std::error::Error + 'static,
{
    #[error("Executor error: {0}")]
    Executor(#[source] E),

    #[error("Row mapping failed: {0}")]
    Mapping(#[from] RecordError),
}
