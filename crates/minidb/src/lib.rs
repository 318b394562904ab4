//! # minidb
//!
//! A minimal PostgreSQL data-access layer.
//!
//! ## Features
//!
//! - **Statement builders**: stateless functions producing SELECT / INSERT /
//!   UPDATE / DELETE text from a table name, columns, a predicate set and a data mapping
//! - **Two value modes**: literal interpolation, or `$n` placeholders with bound values
//! - **Table adapter**: CRUD on one table, buffering selected rows behind a clamped cursor
//! - **Explicit connection**: one lazily opened connection, injected into adapters
//!   as an [`Executor`]; no global state
//! - **SQL logging**: every issued statement is traced on the `minidb.sql` target
//!
//! ## Statement builders
//!
//! ```rust
//! use minidb::Fields;
//! use minidb::builder::{build_delete, build_select};
//!
//! let by_id = Fields::new().with("id", 5);
//! assert_eq!(
//!     build_select("users", ["id", "name"], &by_id),
//!     "SELECT id, name FROM users WHERE id=5;"
//! );
//! assert_eq!(build_delete("users", &by_id), "DELETE FROM users WHERE id=5;");
//! ```
//!
//! ## Table adapter
//!
//! ```ignore
//! use minidb::{ConnectionConfig, ConnectionProvider, Fields, TableAdapter};
//!
//! let provider = ConnectionProvider::new(&ConnectionConfig::from_toml_file("config/database.toml")?);
//! let mut users = TableAdapter::new("users", &provider);
//!
//! let id = users.insert(&Fields::new().with("name", "Alice").with("age", 30)).await?;
//! users.select(&Fields::new().with("age", 30)).await?;
//! let first = users.current_row()?;
//! ```

pub mod adapter;
pub mod builder;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod fields;
pub mod row;
pub mod trace;
pub mod value;

pub use adapter::TableAdapter;
pub use builder::{Columns, QueryMode, Statement, StatementKind};
pub use config::ConnectionConfig;
pub use connection::ConnectionProvider;
pub use error::{DbError, DbResult};
pub use executor::{ExecResult, Executor};
pub use fields::Fields;
pub use row::Row;
pub use trace::SqlTrace;
pub use value::Value;
