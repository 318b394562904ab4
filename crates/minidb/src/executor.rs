//! The executor capability: runs generated SQL against a live connection.

use crate::builder::Statement;
use crate::error::DbResult;
use crate::row::Row;
use std::sync::Arc;

/// Outcome of running one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    /// Rows returned by a query, in server order.
    Rows(Vec<Row>),
    /// Outcome of a mutation.
    Affected {
        rows_affected: u64,
        /// Identifier generated by the last insert on this connection, if any.
        last_insert_id: Option<i64>,
    },
}

impl ExecResult {
    /// Rows of a query result; a mutation yields no rows.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            ExecResult::Rows(rows) => rows,
            ExecResult::Affected { .. } => Vec::new(),
        }
    }

    pub fn last_insert_id(&self) -> Option<i64> {
        match self {
            ExecResult::Affected { last_insert_id, .. } => *last_insert_id,
            ExecResult::Rows(_) => None,
        }
    }

    /// Affected row count for mutations, returned row count for queries.
    pub fn rows_affected(&self) -> u64 {
        match self {
            ExecResult::Affected { rows_affected, .. } => *rows_affected,
            ExecResult::Rows(rows) => rows.len() as u64,
        }
    }
}

/// Anything that can run a [`Statement`].
///
/// [`ConnectionProvider`](crate::ConnectionProvider) is the production
/// implementation. Adapters take the executor by value, so pass `&provider`
/// or an `Arc` to share one connection between adapters.
pub trait Executor: Send + Sync {
    /// Run `statement` and report its rows or its mutation outcome.
    ///
    /// Failures (lost connection, rejected SQL) surface as
    /// [`DbError::Execution`](crate::DbError::Execution) or
    /// [`DbError::Connection`](crate::DbError::Connection).
    fn execute(
        &self,
        statement: &Statement,
    ) -> impl std::future::Future<Output = DbResult<ExecResult>> + Send;
}

impl<E: Executor> Executor for &E {
    fn execute(
        &self,
        statement: &Statement,
    ) -> impl std::future::Future<Output = DbResult<ExecResult>> + Send {
        (**self).execute(statement)
    }
}

impl<E: Executor> Executor for Arc<E> {
    fn execute(
        &self,
        statement: &Statement,
    ) -> impl std::future::Future<Output = DbResult<ExecResult>> + Send {
        (**self).execute(statement)
    }
}
