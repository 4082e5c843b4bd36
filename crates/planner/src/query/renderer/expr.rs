use crate::query::{
    ast::expr::{BinaryOp, BinaryOperator, Expr, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::BinaryOp(op) => op.render(r),
            Expr::Wildcard => r.sql.push('*'),
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.sql.push_str(&r.dialect.quote_identifier(qualifier));
            r.sql.push('.');
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        r.sql.push('(');
        self.left.render(r);

        let op_str = match self.op {
            BinaryOperator::Eq => " = ",
            BinaryOperator::And => " AND ",
        };
        r.sql.push_str(op_str);

        self.right.render(r);
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::expr::Expr,
        dialect::{Postgres, Sqlite},
        ident,
        renderer::render_sql,
        value,
    };
    use model::core::value::Value;

    #[test]
    fn test_render_nested_condition() {
        let expr = Expr::and(
            Expr::eq(ident("table_schema"), value(Value::String("content".into()))),
            Expr::eq(ident("table_name"), value(Value::String("genre".into()))),
        );

        let (sql, params) = render_sql(&expr, &Postgres);
        assert_eq!(
            sql,
            r#"(("table_schema" = $1) AND ("table_name" = $2))"#
        );
        assert_eq!(params.len(), 2);

        let (sql, _) = render_sql(&expr, &Sqlite);
        assert_eq!(sql, r#"(("table_schema" = ?) AND ("table_name" = ?))"#);
    }
}
