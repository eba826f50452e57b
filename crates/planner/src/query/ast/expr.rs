//! Defines the expression nodes used in WHERE and ORDER BY clauses.

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column reference, e.g. `"users"."id"`.
    Identifier(Ident),

    /// A bound parameter.
    Value(Value),

    /// Raw SQL emitted verbatim.
    Literal(String),

    BinaryOp(Box<BinaryOp>),

    /// A parenthesised sub-expression.
    Grouped(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    And,
    Or,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::BinaryOp(Box::new(BinaryOp { left, op, right }))
    }

    pub fn and(self, right: Expr) -> Expr {
        Expr::binary(self, BinaryOperator::And, right)
    }

    pub fn or(self, right: Expr) -> Expr {
        Expr::binary(self, BinaryOperator::Or, right)
    }

    pub fn grouped(self) -> Expr {
        Expr::Grouped(Box::new(self))
    }
}
