use async_trait::async_trait;
use model::{
    core::value::Value,
    records::{record::FieldSpec, row::RowData},
};
use planner::query::dialect::Dialect;
use std::error::Error;

/// Driver-facing half of a SQL row source.
///
/// Implementations own the connection and know how to bind [`Value`]
/// parameters and read result sets back into [`RowData`].
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    type Error: Error + Send + Sync + 'static;

    fn dialect(&self) -> &dyn Dialect;

    /// Column layout of a table.
    async fn describe(&self, table: &str) -> Result<Vec<FieldSpec>, Self::Error>;

    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, Self::Error>;
}
