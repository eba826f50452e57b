//! Defines the core rendering trait and context for converting AST to SQL.

use crate::query::{
    ast::{common::TableRef, expr::Ident},
    dialect::Dialect,
};
use model::core::value::Value;

pub mod expr;
pub mod select;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the parameters, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }

    pub fn render_table_ref(&mut self, table: &TableRef) {
        if let Some(schema) = &table.schema {
            let schema = self.dialect.quote_identifier(schema);
            self.sql.push_str(&schema);
            self.sql.push('.');
        }
        let name = self.dialect.quote_identifier(&table.name);
        self.sql.push_str(&name);
    }

    pub fn render_ident(&mut self, ident: &Ident) {
        if let Some(qualifier) = &ident.qualifier {
            let qualifier = self.dialect.quote_identifier(qualifier);
            self.sql.push_str(&qualifier);
            self.sql.push('.');
        }
        let name = self.dialect.quote_identifier(&ident.name);
        self.sql.push_str(&name);
    }
}
