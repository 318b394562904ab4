use crate::fields::Fields;
use crate::value::Value;
use std::fmt;

/// How values are placed into generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Values are interpolated as SQL literals (`'Alice'`, `30`).
    #[default]
    Literal,
    /// Values become `$1, $2, ...` placeholders and travel in [`Statement::params`].
    Parameterized,
}

/// The kind of statement a builder produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    /// Whether the executor is expected to return rows.
    pub fn returns_rows(self) -> bool {
        matches!(self, StatementKind::Select)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered SQL statement together with its bound values.
///
/// In [`QueryMode::Literal`] `params` is always empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
    kind: StatementKind,
    table: String,
}

impl Statement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The table the statement targets, as given to the builder.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Places values into SQL text according to a [`QueryMode`], numbering
/// placeholders in the order they are rendered.
pub(crate) struct Renderer {
    mode: QueryMode,
    params: Vec<Value>,
}

impl Renderer {
    pub(crate) fn new(mode: QueryMode) -> Self {
        Self {
            mode,
            params: Vec::new(),
        }
    }

    /// Render one value. `NULL` is always emitted literally.
    pub(crate) fn value(&mut self, value: &Value) -> String {
        match self.mode {
            QueryMode::Parameterized if !value.is_null() => {
                self.params.push(value.clone());
                format!("${}", self.params.len())
            }
            _ => value.to_literal(),
        }
    }

    /// `col=value`, used by SET lists.
    pub(crate) fn assignment(&mut self, column: &str, value: &Value) -> String {
        format!("{}={}", column, self.value(value))
    }

    /// `col=value`, or `col IS NULL` for a null requirement.
    pub(crate) fn predicate(&mut self, column: &str, value: &Value) -> String {
        if value.is_null() {
            return format!("{} IS NULL", column);
        }
        self.assignment(column, value)
    }

    /// Predicates joined with ` AND `; empty input renders an empty string.
    pub(crate) fn where_clause(&mut self, predicates: &Fields) -> String {
        predicates
            .iter()
            .map(|(col, val)| self.predicate(col, val))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Append ` WHERE ...` to `sql` when `predicates` is non-empty.
    pub(crate) fn push_where(&mut self, sql: &mut String, predicates: &Fields) {
        if predicates.is_empty() {
            return;
        }
        sql.push_str(" WHERE ");
        let clause = self.where_clause(predicates);
        sql.push_str(&clause);
    }

    pub(crate) fn into_params(self) -> Vec<Value> {
        self.params
    }

    pub(crate) fn finish(self, mut sql: String, kind: StatementKind, table: &str) -> Statement {
        sql.push(';');
        Statement {
            sql,
            params: self.params,
            kind,
            table: table.to_string(),
        }
    }
}
