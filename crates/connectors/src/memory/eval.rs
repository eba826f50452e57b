use crate::error::MemorySourceError;
use model::{core::value::Value, records::record::Record};
use planner::query::ast::expr::{BinaryOp, BinaryOperator, Expr};
use std::cmp::Ordering;

/// Evaluates query expressions against a single record.
///
/// Comparisons involving `NULL` yield `NULL`; comparisons between values
/// with no common ordering yield `false`.
pub(crate) struct RecordEvaluator<'a, R: ?Sized> {
    record: &'a R,
}

impl<'a, R: Record + ?Sized> RecordEvaluator<'a, R> {
    pub fn new(record: &'a R) -> Self {
        Self { record }
    }

    /// True only when the expression evaluates to boolean `true`.
    pub fn matches(&self, expr: &Expr) -> Result<bool, MemorySourceError> {
        Ok(self.evaluate(expr)? == Value::Boolean(true))
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value, MemorySourceError> {
        match expr {
            Expr::Identifier(ident) => {
                let field = self.record.field(&ident.name)?;
                Ok(field.present().cloned().unwrap_or(Value::Null))
            }
            Expr::Value(value) => Ok(value.clone()),
            Expr::Literal(sql) => match sql.to_ascii_uppercase().as_str() {
                "TRUE" => Ok(Value::Boolean(true)),
                "FALSE" => Ok(Value::Boolean(false)),
                "NULL" => Ok(Value::Null),
                _ => Err(MemorySourceError::UnsupportedExpr(sql.clone())),
            },
            Expr::Grouped(inner) => self.evaluate(inner),
            Expr::BinaryOp(op) => self.evaluate_binary(op),
        }
    }

    fn evaluate_binary(&self, op: &BinaryOp) -> Result<Value, MemorySourceError> {
        let left = self.evaluate(&op.left)?;
        let right = self.evaluate(&op.right)?;

        match op.op {
            BinaryOperator::And => Ok(and(&left, &right)),
            BinaryOperator::Or => Ok(or(&left, &right)),
            cmp => Ok(compare(&left, &right, cmp)),
        }
    }
}

fn compare(left: &Value, right: &Value, op: BinaryOperator) -> Value {
    if *left == Value::Null || *right == Value::Null {
        return Value::Null;
    }

    let Some(ordering) = left.compare(right) else {
        return Value::Boolean(false);
    };

    Value::Boolean(match op {
        BinaryOperator::Eq => ordering == Ordering::Equal,
        BinaryOperator::NotEq => ordering != Ordering::Equal,
        BinaryOperator::Gt => ordering == Ordering::Greater,
        BinaryOperator::GtEq => ordering != Ordering::Less,
        BinaryOperator::Lt => ordering == Ordering::Less,
        BinaryOperator::LtEq => ordering != Ordering::Greater,
        BinaryOperator::And | BinaryOperator::Or => false,
    })
}

fn and(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Boolean(false), _) | (_, Value::Boolean(false)) => Value::Boolean(false),
        (Value::Boolean(true), Value::Boolean(true)) => Value::Boolean(true),
        _ => Value::Null,
    }
}

fn or(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Boolean(true), _) | (_, Value::Boolean(true)) => Value::Boolean(true),
        (Value::Boolean(false), Value::Boolean(false)) => Value::Boolean(false),
        _ => Value::Null,
    }
}

/// Orders two key tuples; `NULL` sorts before any value.
pub(crate) fn compare_keys(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => left.compare(right).unwrap_or(Ordering::Equal),
    }
}
