use crate::query::{
    ast::expr::{BinaryOp, Expr},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => r.render_ident(ident),
            Expr::Value(value) => r.add_param(value.clone()),
            Expr::Literal(sql) => r.sql.push_str(sql),
            Expr::BinaryOp(op) => op.render(r),
            Expr::Grouped(inner) => {
                r.sql.push('(');
                inner.render(r);
                r.sql.push(')');
            }
        }
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        self.left.render(r);
        r.sql.push(' ');
        r.sql.push_str(self.op.as_str());
        r.sql.push(' ');
        self.right.render(r);
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::expr::{BinaryOperator, Expr},
        dialect::{MySql, Postgres},
        ident,
        renderer::{Render, Renderer},
        value,
    };
    use model::core::value::Value;

    fn sample() -> Expr {
        let gt = Expr::binary(ident("t.a"), BinaryOperator::Gt, value(Value::Int(1)));
        let eq = Expr::binary(ident("t.a"), BinaryOperator::Eq, value(Value::Int(1)));
        let tie = Expr::binary(ident("t.b"), BinaryOperator::Gt, value(Value::Int(2)));
        gt.grouped().or(eq.and(tie).grouped())
    }

    #[test]
    fn test_render_expr_postgres() {
        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        sample().render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(
            sql,
            r#"("t"."a" > $1) OR ("t"."a" = $2 AND "t"."b" > $3)"#
        );
        assert_eq!(params, vec![Value::Int(1), Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_render_expr_mysql() {
        let dialect = MySql;
        let mut renderer = Renderer::new(&dialect);
        sample().render(&mut renderer);
        let (sql, _) = renderer.finish();

        assert_eq!(sql, "(`t`.`a` > ?) OR (`t`.`a` = ? AND `t`.`b` > ?)");
    }

    #[test]
    fn test_render_literal_verbatim() {
        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        Expr::Literal("TRUE".to_string()).render(&mut renderer);
        assert_eq!(renderer.finish(), ("TRUE".to_string(), vec![]));
    }
}
