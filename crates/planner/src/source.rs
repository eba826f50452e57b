use crate::query::{
    ast::{
        common::TableRef,
        expr::Expr,
        select::{OrderByExpr, Select},
    },
    builder::select::SelectBuilder,
    dialect::Dialect,
    renderer::{Render, Renderer},
    value,
};
use async_trait::async_trait;
use model::{
    core::value::Value,
    records::record::{FieldSpec, Record},
};
use std::error::Error;

/// One bounded, ordered fetch against a storage collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekQuery {
    pub table: TableRef,
    pub predicate: Option<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: usize,
}

impl SeekQuery {
    pub fn to_select(&self) -> Select {
        let mut builder = SelectBuilder::new().from(self.table.clone(), None);
        if let Some(predicate) = &self.predicate {
            builder = builder.where_clause(predicate.clone());
        }
        for order in &self.order_by {
            builder = builder.order_by(order.expr.clone(), order.direction);
        }
        builder.limit(value(Value::Uint(self.limit as u64))).build()
    }

    /// Renders the query as SQL text plus its bound parameters.
    pub fn render(&self, dialect: &dyn Dialect) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(dialect);
        self.to_select().render(&mut renderer);
        renderer.finish()
    }
}

/// Storage collaborator that pages are read from.
#[async_trait]
pub trait RowSource: Send + Sync {
    type Record: Record + Send;
    type Error: Error + Send + Sync + 'static;

    /// Declared fields of an entity, used to validate and type the keys.
    async fn fields(&self, entity: &str) -> Result<Vec<FieldSpec>, Self::Error>;

    /// Runs the query and materializes at most `query.limit` records.
    async fn fetch(&self, query: SeekQuery) -> Result<Vec<Self::Record>, Self::Error>;
}
