//! Table adapter: CRUD against one table plus a buffered, cursor-navigated result set.
//!
//! ```ignore
//! use minidb::{Fields, TableAdapter};
//!
//! let mut users = TableAdapter::new("users", &provider);
//! let id = users.insert(&Fields::new().with("name", "Alice").with("age", 30)).await?;
//!
//! users.select(&Fields::new().with("age", 30)).await?;
//! for _ in 0..users.row_count() {
//!     println!("{:?}", users.current_row()?);
//!     users.next_row();
//! }
//! ```

use crate::builder::{
    QueryMode, Statement, delete_statement, insert_statement, select_statement, update_statement,
};
use crate::error::{DbError, DbResult};
use crate::executor::{ExecResult, Executor};
use crate::fields::Fields;
use crate::row::Row;
use crate::trace::SqlTrace;

/// CRUD operations on a single table through an injected [`Executor`].
///
/// An adapter built with an empty table name is *unconfigured*: `select`,
/// `insert`, `update` and `delete` return immediately without touching the
/// executor, and report nothing (`Ok(())` / `Ok(None)`).
///
/// `select` replaces the row buffer and puts the cursor on the first row. Cursor
/// movement is clamped to `[0, row_count() - 1]`; on an empty buffer there is no
/// cursor and every move is a no-op.
pub struct TableAdapter<E> {
    table: Option<String>,
    executor: E,
    mode: QueryMode,
    trace: SqlTrace,
    rows: Vec<Row>,
    cursor: Option<usize>,
}

impl<E: Executor> TableAdapter<E> {
    /// Bind an adapter to `table`. An empty name yields an unconfigured adapter.
    pub fn new(table: impl Into<String>, executor: E) -> Self {
        let table = table.into();
        Self {
            table: (!table.is_empty()).then_some(table),
            executor,
            mode: QueryMode::default(),
            trace: SqlTrace::default(),
            rows: Vec::new(),
            cursor: None,
        }
    }

    /// Choose literal or parameterized statements.
    pub fn with_mode(mut self, mode: QueryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override SQL logging settings.
    pub fn with_trace(mut self, trace: SqlTrace) -> Self {
        self.trace = trace;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.table.is_some()
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Table name for a mutating call, or `None` (logged) when unconfigured.
    fn configured_table(&self, op: &'static str) -> Option<&str> {
        let table = self.table.as_deref();
        if table.is_none() {
            tracing::debug!(target: "minidb.sql", op, "adapter has no table name; skipping");
        }
        table
    }

    async fn run(&self, table: &str, statement: Statement) -> DbResult<ExecResult> {
        self.trace.emit(table, &statement);
        self.executor.execute(&statement).await
    }

    // ==================== CRUD ====================

    /// `SELECT * FROM <table>[ WHERE ...]`, buffering every returned row.
    ///
    /// On success the previous buffer is discarded and the cursor moves to the
    /// first row (or is cleared when nothing matched). On error the buffer is
    /// left untouched.
    pub async fn select(&mut self, predicates: &Fields) -> DbResult<()> {
        let Some(table) = self.configured_table("select") else {
            return Ok(());
        };
        let statement = select_statement(self.mode, table, "*", predicates);
        let rows = self.run(table, statement).await?.into_rows();

        self.cursor = (!rows.is_empty()).then_some(0);
        self.rows = rows;
        Ok(())
    }

    /// Insert one row and return the identifier the executor reports for it.
    pub async fn insert(&self, data: &Fields) -> DbResult<Option<i64>> {
        let Some(table) = self.configured_table("insert") else {
            return Ok(None);
        };
        if data.is_empty() {
            return Err(DbError::validation("INSERT requires at least one column"));
        }
        let statement = insert_statement(self.mode, table, data);
        Ok(self.run(table, statement).await?.last_insert_id())
    }

    /// Update rows matching `predicates` (all rows when empty).
    pub async fn update(&self, data: &Fields, predicates: &Fields) -> DbResult<()> {
        let Some(table) = self.configured_table("update") else {
            return Ok(());
        };
        if data.is_empty() {
            return Err(DbError::validation("UPDATE requires at least one SET column"));
        }
        let statement = update_statement(self.mode, table, data, predicates);
        self.run(table, statement).await?;
        Ok(())
    }

    /// Delete rows matching `predicates` (all rows when empty).
    pub async fn delete(&self, predicates: &Fields) -> DbResult<()> {
        let Some(table) = self.configured_table("delete") else {
            return Ok(());
        };
        let statement = delete_statement(self.mode, table, predicates);
        self.run(table, statement).await?;
        Ok(())
    }
}

// Buffer and cursor access needs no executor.
impl<E> TableAdapter<E> {
    /// Every buffered row, in the order the executor returned them.
    pub fn get_results(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Current cursor position; `None` when the buffer is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn first_row_index(&self) -> usize {
        0
    }

    /// Index of the last buffered row; `None` when the buffer is empty.
    pub fn last_row_index(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    /// Whether `index` addresses a buffered row.
    pub fn in_range(&self, index: usize) -> bool {
        index < self.rows.len()
    }

    /// Row under the cursor.
    ///
    /// Fails with [`DbError::OutOfBounds`] when the buffer is empty.
    pub fn current_row(&self) -> DbResult<&Row> {
        let index = self.cursor.unwrap_or(0);
        self.cursor
            .and_then(|i| self.rows.get(i))
            .ok_or(DbError::OutOfBounds {
                index,
                len: self.rows.len(),
            })
    }

    pub fn first_row(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = Some(self.first_row_index());
        }
    }

    pub fn last_row(&mut self) {
        if let Some(last) = self.last_row_index() {
            self.cursor = Some(last);
        }
    }

    /// Advance by one; a no-op on the last row.
    pub fn next_row(&mut self) {
        if let (Some(cur), Some(last)) = (self.cursor, self.last_row_index()) {
            if cur < last {
                self.cursor = Some(cur + 1);
            }
        }
    }

    /// Retreat by one; a no-op on the first row.
    pub fn previous_row(&mut self) {
        if let Some(cur) = self.cursor {
            if cur > self.first_row_index() {
                self.cursor = Some(cur - 1);
            }
        }
    }

    /// Move the cursor to `index`; ignored when `index` is out of range.
    pub fn row_at(&mut self, index: usize) {
        if self.in_range(index) {
            self.cursor = Some(index);
        }
    }

    /// Row at `index` without moving the cursor; `None` when out of range.
    pub fn get_row_at(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }
}

#[cfg(test)]
mod tests;
