use super::statement::{QueryMode, Renderer, Statement, StatementKind};
use crate::fields::Fields;

/// `INSERT INTO <table> ( c1, c2 ) VALUES ( v1, v2 );` in the data mapping's order.
pub fn insert_statement(mode: QueryMode, table: &str, data: &Fields) -> Statement {
    let mut r = Renderer::new(mode);
    let columns = data.columns().collect::<Vec<_>>().join(", ");
    let values = data
        .iter()
        .map(|(_, v)| r.value(v))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("INSERT INTO {} ( {} ) VALUES ( {} )", table, columns, values);
    r.finish(sql, StatementKind::Insert, table)
}

/// Literal-mode INSERT.
pub fn build_insert(table: &str, data: &Fields) -> String {
    insert_statement(QueryMode::Literal, table, data).into_sql()
}
