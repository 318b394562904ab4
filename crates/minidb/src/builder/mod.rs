//! SQL statement builders.
//!
//! Stateless functions that turn a table name, a column specification, a
//! predicate set and a data mapping into SQL text.
//!
//! ## Design
//!
//! - Every statement ends with `;`. `WHERE` is appended only for a non-empty
//!   predicate set, and predicates are always AND-combined.
//! - Table and column names are emitted verbatim.
//! - Two modes share one layout: [`QueryMode::Literal`] interpolates values
//!   (strings single-quoted, not escaped) and [`QueryMode::Parameterized`]
//!   emits `$1, $2, ...` placeholders with the values kept aside.
//!
//! ```rust
//! use minidb::Fields;
//! use minidb::builder::{QueryMode, build_insert, update_statement};
//!
//! let data = Fields::new().with("name", "Alice").with("age", 30);
//! assert_eq!(
//!     build_insert("users", &data),
//!     "INSERT INTO users ( name, age ) VALUES ( 'Alice', 30 );"
//! );
//!
//! let stmt = update_statement(
//!     QueryMode::Parameterized,
//!     "users",
//!     &Fields::new().with("age", 31),
//!     &Fields::new().with("id", 5),
//! );
//! assert_eq!(stmt.sql(), "UPDATE users SET age=$1 WHERE id=$2;");
//! assert_eq!(stmt.param_count(), 2);
//! ```

pub mod delete;
pub mod insert;
pub mod select;
pub mod statement;
pub mod update;
pub mod where_clause;

pub use delete::{build_delete, delete_statement};
pub use insert::{build_insert, insert_statement};
pub use select::{Columns, build_select, select_statement};
pub use statement::{QueryMode, Statement, StatementKind};
pub use update::{build_update, update_statement};
pub use where_clause::{build_where, build_where_params};
