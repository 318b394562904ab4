use super::statement::{QueryMode, Renderer, Statement, StatementKind};
use crate::fields::Fields;

/// Column list for SELECT: the `*` wildcard or an explicit ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Columns {
    #[default]
    All,
    List(Vec<String>),
}

impl Columns {
    /// Render as `*` or a comma-joined list. An empty list renders as `*`.
    pub fn render(&self) -> String {
        match self {
            Columns::List(cols) if !cols.is_empty() => cols.join(", "),
            _ => "*".to_string(),
        }
    }
}

impl From<&str> for Columns {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == "*" {
            Columns::All
        } else {
            Columns::List(vec![s.to_string()])
        }
    }
}

impl From<&[&str]> for Columns {
    fn from(cols: &[&str]) -> Self {
        Columns::List(cols.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(cols: [&str; N]) -> Self {
        Columns::from(&cols[..])
    }
}

impl From<Vec<&str>> for Columns {
    fn from(cols: Vec<&str>) -> Self {
        Columns::from(&cols[..])
    }
}

impl From<Vec<String>> for Columns {
    fn from(cols: Vec<String>) -> Self {
        Columns::List(cols)
    }
}

/// `SELECT <cols> FROM <table>[ WHERE <predicates>];`
pub fn select_statement(
    mode: QueryMode,
    table: &str,
    columns: impl Into<Columns>,
    predicates: &Fields,
) -> Statement {
    let mut r = Renderer::new(mode);
    let mut sql = format!("SELECT {} FROM {}", columns.into().render(), table);
    r.push_where(&mut sql, predicates);
    r.finish(sql, StatementKind::Select, table)
}

/// Literal-mode SELECT.
///
/// ```rust
/// use minidb::{Fields, builder::build_select};
///
/// assert_eq!(build_select("users", "*", &Fields::new()), "SELECT * FROM users;");
/// assert_eq!(
///     build_select("users", ["id", "name"], &Fields::new().with("id", 5)),
///     "SELECT id, name FROM users WHERE id=5;"
/// );
/// ```
pub fn build_select(table: &str, columns: impl Into<Columns>, predicates: &Fields) -> String {
    select_statement(QueryMode::Literal, table, columns, predicates).into_sql()
}
