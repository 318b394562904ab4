use super::statement::{QueryMode, Renderer, Statement, StatementKind};
use crate::fields::Fields;

/// `UPDATE <table> SET c1=v1, c2=v2[ WHERE <predicates>];`
///
/// In parameterized mode SET values are numbered before WHERE values.
pub fn update_statement(
    mode: QueryMode,
    table: &str,
    data: &Fields,
    predicates: &Fields,
) -> Statement {
    let mut r = Renderer::new(mode);
    let set = data
        .iter()
        .map(|(c, v)| r.assignment(c, v))
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!("UPDATE {} SET {}", table, set);
    r.push_where(&mut sql, predicates);
    r.finish(sql, StatementKind::Update, table)
}

/// Literal-mode UPDATE.
pub fn build_update(table: &str, data: &Fields, predicates: &Fields) -> String {
    update_statement(QueryMode::Literal, table, data, predicates).into_sql()
}
