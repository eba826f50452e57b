use crate::query::ast::expr::{Expr, Ident};
use model::core::value::Value;

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;

/// Builds a column reference, splitting an optional `table.` qualifier.
pub fn ident(name: &str) -> Expr {
    match name.split_once('.') {
        Some((qualifier, column)) => Expr::Identifier(Ident {
            qualifier: Some(qualifier.to_string()),
            name: column.to_string(),
        }),
        None => Expr::Identifier(Ident {
            qualifier: None,
            name: name.to_string(),
        }),
    }
}

pub fn value(val: Value) -> Expr {
    Expr::Value(val)
}
