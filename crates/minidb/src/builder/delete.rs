use super::statement::{QueryMode, Renderer, Statement, StatementKind};
use crate::fields::Fields;

/// `DELETE FROM <table>[ WHERE <predicates>];`
///
/// An empty predicate set deletes every row; no implicit guard is added.
pub fn delete_statement(mode: QueryMode, table: &str, predicates: &Fields) -> Statement {
    let mut r = Renderer::new(mode);
    let mut sql = format!("DELETE FROM {}", table);
    r.push_where(&mut sql, predicates);
    r.finish(sql, StatementKind::Delete, table)
}

/// Literal-mode DELETE.
pub fn build_delete(table: &str, predicates: &Fields) -> String {
    delete_statement(QueryMode::Literal, table, predicates).into_sql()
}
