//! Lazily opened, long-lived PostgreSQL connection.
//!
//! Construct one [`ConnectionProvider`] at startup and hand it (by reference or
//! in an `Arc`) to every [`TableAdapter`](crate::TableAdapter). The network
//! connection is opened on the first statement and reused afterwards.
//!
//! ```ignore
//! use minidb::{ConnectionConfig, ConnectionProvider, TableAdapter};
//!
//! let provider = ConnectionProvider::new(&ConnectionConfig::from_env()?);
//! let mut users = TableAdapter::new("users", &provider);
//! users.select(&Default::default()).await?;
//! ```

use crate::builder::{Statement, StatementKind};
use crate::config::ConnectionConfig;
use crate::error::{DbError, DbResult};
use crate::executor::{ExecResult, Executor};
use crate::row::Row;
use tokio::sync::{Mutex, OnceCell};
use tokio_postgres::error::SqlState;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};

/// Holds the single shared connection and runs statements on it.
///
/// Safe to share across tasks: an INSERT and the lookup of the id it generated
/// run as one unit under `insert_lock`, so concurrent inserts cannot read each
/// other's sequence values.
pub struct ConnectionProvider {
    pg_config: tokio_postgres::Config,
    client: OnceCell<Client>,
    insert_lock: Mutex<()>,
}

impl ConnectionProvider {
    /// Create a provider; no connection is made yet.
    pub fn new(config: &ConnectionConfig) -> Self {
        Self::from_pg_config(config.to_pg_config())
    }

    /// Create a provider from a PostgreSQL connection URL.
    pub fn from_url(database_url: &str) -> DbResult<Self> {
        let pg_config: tokio_postgres::Config = database_url
            .parse()
            .map_err(|e: tokio_postgres::Error| DbError::Connection(e.to_string()))?;
        Ok(Self::from_pg_config(pg_config))
    }

    pub fn from_pg_config(pg_config: tokio_postgres::Config) -> Self {
        Self {
            pg_config,
            client: OnceCell::new(),
            insert_lock: Mutex::new(()),
        }
    }

    /// Whether the connection has been opened.
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    /// The shared client, connecting on first use.
    pub async fn client(&self) -> DbResult<&Client> {
        self.client.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> DbResult<Client> {
        let (client, connection) = self
            .pg_config
            .connect(NoTls)
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(target: "minidb.sql", error = %e, "connection closed with error");
            }
        });

        tracing::info!(
            target: "minidb.sql",
            hosts = ?self.pg_config.get_hosts(),
            dbname = self.pg_config.get_dbname().unwrap_or("-"),
            "database connection opened"
        );
        Ok(client)
    }
}

/// Current value of the first sequence owned by a column of `table`
/// (`SERIAL`, `BIGSERIAL` or identity columns), in column order.
const OWNED_SEQUENCE_CURRVAL: &str = "SELECT currval(s.seq::regclass) FROM ( \
     SELECT pg_get_serial_sequence($1::text, a.attname::text) AS seq, a.attnum \
     FROM pg_attribute a \
     WHERE a.attrelid = $1::text::regclass AND a.attnum > 0 AND NOT a.attisdropped \
     ) s WHERE s.seq IS NOT NULL ORDER BY s.attnum LIMIT 1";

/// Identifier generated for `table` by the INSERT just run on this session.
///
/// `None` when the table owns no sequence, or when its sequence was not
/// advanced on this session (the INSERT supplied the key explicitly), which
/// `currval` reports as SQLSTATE 55000.
async fn last_insert_id(client: &Client, table: &str) -> DbResult<Option<i64>> {
    match client.query_opt(OWNED_SEQUENCE_CURRVAL, &[&table]).await {
        Ok(Some(row)) => row
            .try_get::<_, i64>(0)
            .map(Some)
            .map_err(|e| DbError::decode("currval", e.to_string())),
        Ok(None) => {
            tracing::trace!(target: "minidb.sql", table, "table owns no sequence");
            Ok(None)
        }
        Err(e) if e.code() == Some(&SqlState::OBJECT_NOT_IN_PREREQUISITE_STATE) => {
            tracing::trace!(target: "minidb.sql", table, "sequence not used on this session");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

impl Executor for ConnectionProvider {
    async fn execute(&self, statement: &Statement) -> DbResult<ExecResult> {
        let client = self.client().await?;
        let params: Vec<&(dyn ToSql + Sync)> = statement
            .params()
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect();

        if statement.kind().returns_rows() {
            let rows = client.query(statement.sql(), &params).await?;
            let rows = rows.iter().map(Row::try_from).collect::<DbResult<Vec<_>>>()?;
            return Ok(ExecResult::Rows(rows));
        }

        if statement.kind() != StatementKind::Insert {
            let rows_affected = client.execute(statement.sql(), &params).await?;
            return Ok(ExecResult::Affected {
                rows_affected,
                last_insert_id: None,
            });
        }

        let _guard = self.insert_lock.lock().await;
        let rows_affected = client.execute(statement.sql(), &params).await?;
        let last_insert_id = last_insert_id(client, statement.table()).await?;
        Ok(ExecResult::Affected {
            rows_affected,
            last_insert_id,
        })
    }
}
