use crate::query::{
    ast::{
        expr::Expr,
        insert::{ConflictAction, Insert, OnConflict},
    },
    renderer::{Render, Renderer},
};

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.table);
        r.sql.push(' ');
        r.render_column_list(&self.columns);

        r.sql.push_str(" VALUES ");
        for (i, row) in self.values.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            render_tuple(row, r);
        }

        if let Some(on_conflict) = self.on_conflict.as_ref().filter(|c| !c.columns.is_empty()) {
            render_on_conflict(on_conflict, r);
        }
    }
}

fn render_tuple(row: &[Expr], r: &mut Renderer) {
    r.sql.push('(');
    for (i, expr) in row.iter().enumerate() {
        if i > 0 {
            r.sql.push_str(", ");
        }
        expr.render(r);
    }
    r.sql.push(')');
}

/// Only the conflict target and the skip action are ever emitted; rows that
/// collide on the target are left untouched.
fn render_on_conflict(on_conflict: &OnConflict, r: &mut Renderer) {
    r.sql.push_str(" ON CONFLICT ");
    r.render_column_list(&on_conflict.columns);
    match on_conflict.action {
        ConflictAction::DoNothing => r.sql.push_str(" DO NOTHING"),
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::query::{
        ast::{
            common::TableRef,
            insert::{ConflictAction, Insert, OnConflict},
        },
        dialect::Postgres,
        renderer::render_sql,
        value,
    };

    #[test]
    fn test_render_batch_insert_on_conflict_do_nothing() {
        let ast = Insert {
            table: TableRef::qualified("content", "genre"),
            columns: vec!["id".to_string(), "name".to_string()],
            values: vec![
                vec![
                    value(Value::String("a".to_string())),
                    value(Value::String("Action".to_string())),
                ],
                vec![
                    value(Value::String("b".to_string())),
                    value(Value::Null),
                ],
            ],
            on_conflict: Some(OnConflict {
                columns: vec!["id".to_string()],
                action: ConflictAction::DoNothing,
            }),
        };

        let (sql, params) = render_sql(&ast, &Postgres);

        assert_eq!(
            sql,
            concat!(
                r#"INSERT INTO "content"."genre" ("id", "name") VALUES ($1, $2), ($3, $4) "#,
                r#"ON CONFLICT ("id") DO NOTHING"#
            )
        );
        assert_eq!(params.len(), 4);
        assert_eq!(params[3], Value::Null);
        assert_eq!(ast.param_count(), 4);
    }

    #[test]
    fn test_render_insert_without_conflict_target() {
        let ast = Insert {
            table: TableRef::new("genre"),
            columns: vec!["id".to_string()],
            values: vec![vec![value(Value::Int(1))]],
            on_conflict: Some(OnConflict {
                columns: vec![],
                action: ConflictAction::DoNothing,
            }),
        };

        let (sql, _) = render_sql(&ast, &Postgres);

        assert_eq!(sql, r#"INSERT INTO "genre" ("id") VALUES ($1)"#);
    }
}
