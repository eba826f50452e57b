use crate::query::ast::{
    common::TableRef,
    expr::Expr,
    select::{FromClause, OrderByExpr, Select},
};
use model::pagination::order::SortOrder;
use std::marker::PhantomData;

/// Builder state before a FROM clause is set.
#[derive(Debug, Clone)]
pub struct InitialState;

/// Builder state once the FROM clause is known; filters and ordering are
/// only available from here.
#[derive(Debug, Clone)]
pub struct FromState;

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    pub ast: Select,
    _state: PhantomData<State>,
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            _state: PhantomData,
        }
    }

    pub fn select(mut self, columns: Vec<Expr>) -> Self {
        self.ast.columns = columns;
        self
    }

    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(|a| a.to_string()),
        });
        SelectBuilder {
            ast: self.ast,
            _state: PhantomData,
        }
    }
}

impl SelectBuilder<FromState> {
    /// Adds a condition, AND-ing it with any existing WHERE clause.
    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(match self.ast.where_clause.take() {
            Some(existing) => existing.grouped().and(condition.grouped()),
            None => condition,
        });
        self
    }

    pub fn order_by(mut self, expr: Expr, direction: Option<SortOrder>) -> Self {
        self.ast.order_by.push(OrderByExpr { expr, direction });
        self
    }

    pub fn limit(mut self, limit: Expr) -> Self {
        self.ast.limit = Some(limit);
        self
    }

    pub fn build(self) -> Select {
        self.ast
    }
}
