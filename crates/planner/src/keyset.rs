//! Seek predicates and ordering for keyset pagination.
//!
//! For keys `[k1..kn]` and a boundary row `[v1..vn]` the predicate selects
//! every row that sorts strictly past the boundary:
//!
//! ```text
//! (k1 op v1) OR (k1 = v1 AND k2 op v2) OR ... OR (k1 = v1 AND ... AND kn op vn)
//! ```

use crate::{
    query::{
        ast::{
            common::TableRef,
            expr::{BinaryOperator, Expr},
            select::OrderByExpr,
        },
        value,
    },
    source::SeekQuery,
};
use model::{
    core::value::Value,
    pagination::{cursor::Cursor, order::SortOrder},
};

/// Which side of the boundary row a page lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    After,
    Before,
}

impl SeekDirection {
    pub fn of(cursor: &Cursor) -> Option<Self> {
        match cursor {
            Cursor::After(_) => Some(SeekDirection::After),
            Cursor::Before(_) => Some(SeekDirection::Before),
            Cursor::None => None,
        }
    }
}

/// `>` when seeking after in ascending order or before in descending order.
pub fn seek_operator(direction: SeekDirection, order: SortOrder) -> BinaryOperator {
    match (direction, order) {
        (SeekDirection::After, SortOrder::Asc) | (SeekDirection::Before, SortOrder::Desc) => {
            BinaryOperator::Gt
        }
        _ => BinaryOperator::Lt,
    }
}

/// Order the rows are fetched in; inverted for `before` so the rows nearest
/// the boundary come first.
pub fn fetch_order(direction: Option<SeekDirection>, order: SortOrder) -> SortOrder {
    match direction {
        Some(SeekDirection::Before) => order.flip(),
        _ => order,
    }
}

/// Builds the composite seek predicate. Returns `None` for an empty key list.
pub fn seek_predicate(columns: &[Expr], boundary: &[Value], op: BinaryOperator) -> Option<Expr> {
    let pairs: Vec<(&Expr, &Value)> = columns.iter().zip(boundary.iter()).collect();

    (0..pairs.len())
        .map(|i| {
            let ties = pairs[..i]
                .iter()
                .map(|(col, val)| Expr::binary((*col).clone(), BinaryOperator::Eq, value((*val).clone())));
            let (col, val) = pairs[i];
            let seek = Expr::binary(col.clone(), op, value(val.clone()));

            ties.chain(std::iter::once(seek))
                .reduce(Expr::and)
                .map(Expr::grouped)
        })
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .reduce(Expr::or)
}

/// Key columns with the boundary and ordering of one page fetch.
#[derive(Debug, Clone)]
pub struct Keyset {
    pub columns: Vec<Expr>,
    pub order: SortOrder,
    pub direction: Option<SeekDirection>,
    pub boundary: Vec<Value>,
}

impl Keyset {
    pub fn predicate(&self) -> Option<Expr> {
        let direction = self.direction?;
        seek_predicate(
            &self.columns,
            &self.boundary,
            seek_operator(direction, self.order),
        )
    }

    pub fn order_by(&self) -> Vec<OrderByExpr> {
        let order = fetch_order(self.direction, self.order);
        self.columns
            .iter()
            .map(|col| OrderByExpr {
                expr: col.clone(),
                direction: Some(order),
            })
            .collect()
    }

    /// The bounded fetch against `table` for this keyset.
    pub fn seek_query(&self, table: TableRef, limit: usize) -> SeekQuery {
        SeekQuery {
            table,
            predicate: self.predicate(),
            order_by: self.order_by(),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Keyset, SeekDirection, fetch_order, seek_operator, seek_predicate};
    use crate::query::{
        ast::{common::TableRef, expr::BinaryOperator},
        dialect::Postgres,
        ident,
        renderer::{Render, Renderer},
    };
    use model::{
        core::value::Value,
        pagination::{cursor::Cursor, order::SortOrder, token::Token},
    };

    fn render(expr: &crate::query::ast::expr::Expr) -> String {
        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        renderer.finish().0
    }

    #[test]
    fn test_operator_table() {
        use SeekDirection::*;
        assert_eq!(seek_operator(After, SortOrder::Asc), BinaryOperator::Gt);
        assert_eq!(seek_operator(After, SortOrder::Desc), BinaryOperator::Lt);
        assert_eq!(seek_operator(Before, SortOrder::Asc), BinaryOperator::Lt);
        assert_eq!(seek_operator(Before, SortOrder::Desc), BinaryOperator::Gt);
    }

    #[test]
    fn test_fetch_order_flips_for_before() {
        assert_eq!(fetch_order(None, SortOrder::Desc), SortOrder::Desc);
        assert_eq!(
            fetch_order(Some(SeekDirection::After), SortOrder::Asc),
            SortOrder::Asc
        );
        assert_eq!(
            fetch_order(Some(SeekDirection::Before), SortOrder::Asc),
            SortOrder::Desc
        );
    }

    #[test]
    fn test_direction_of_cursor() {
        assert_eq!(SeekDirection::of(&Cursor::None), None);
        assert_eq!(
            SeekDirection::of(&Cursor::Before(Token::from("x"))),
            Some(SeekDirection::Before)
        );
    }

    #[test]
    fn test_single_key_predicate() {
        let expr = seek_predicate(&[ident("id")], &[Value::Int(5)], BinaryOperator::Gt).unwrap();
        assert_eq!(render(&expr), r#"("id" > $1)"#);
    }

    #[test]
    fn test_two_key_predicate() {
        let expr = seek_predicate(
            &[ident("a"), ident("b")],
            &[Value::Int(1), Value::Int(2)],
            BinaryOperator::Gt,
        )
        .unwrap();
        assert_eq!(render(&expr), r#"("a" > $1) OR ("a" = $2 AND "b" > $3)"#);
    }

    #[test]
    fn test_three_key_predicate() {
        let expr = seek_predicate(
            &[ident("a"), ident("b"), ident("c")],
            &[Value::Int(1), Value::Int(2), Value::Int(3)],
            BinaryOperator::Lt,
        )
        .unwrap();
        assert_eq!(
            render(&expr),
            r#"("a" < $1) OR ("a" = $2 AND "b" < $3) OR ("a" = $4 AND "b" = $5 AND "c" < $6)"#
        );
    }

    #[test]
    fn test_empty_keys_produce_no_predicate() {
        assert!(seek_predicate(&[], &[], BinaryOperator::Gt).is_none());
    }

    #[test]
    fn test_seek_query_before_cursor() {
        let keyset = Keyset {
            columns: vec![ident("id")],
            order: SortOrder::Desc,
            direction: Some(SeekDirection::Before),
            boundary: vec![Value::Int(7)],
        };
        let (sql, params) = keyset
            .seek_query(TableRef::new("users"), 4)
            .render(&Postgres);

        assert_eq!(
            sql,
            r#"SELECT * FROM "users" WHERE ("id" > $1) ORDER BY "id" ASC LIMIT $2"#
        );
        assert_eq!(params, vec![Value::Int(7), Value::Uint(4)]);
    }

    #[test]
    fn test_first_page_has_no_where() {
        let keyset = Keyset {
            columns: vec![ident("id")],
            order: SortOrder::Desc,
            direction: None,
            boundary: vec![],
        };
        assert!(keyset.predicate().is_none());
        assert_eq!(keyset.order_by()[0].direction, Some(SortOrder::Desc));
    }
}
