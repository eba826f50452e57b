use crate::query::{
    ast::select::{OrderByExpr, Select},
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        // 1. SELECT columns
        r.sql.push_str("SELECT ");
        if self.columns.is_empty() {
            r.sql.push('*');
        } else {
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                column.render(r);
            }
        }

        // 2. FROM table [AS alias]
        if let Some(from) = &self.from {
            r.sql.push_str(" FROM ");
            r.render_table_ref(&from.table);
            if let Some(alias) = &from.alias {
                r.sql.push_str(" AS ");
                let alias = r.dialect.quote_identifier(alias);
                r.sql.push_str(&alias);
            }
        }

        // 3. WHERE
        if let Some(condition) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            condition.render(r);
        }

        // 4. ORDER BY
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                order.render(r);
            }
        }

        // 5. LIMIT
        if let Some(limit) = &self.limit {
            r.sql.push_str(" LIMIT ");
            limit.render(r);
        }
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        if let Some(direction) = self.direction {
            r.sql.push(' ');
            r.sql.push_str(direction.as_str());
        }
    }
}
