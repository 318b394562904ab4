//! Shared WHERE clause rendering for SELECT, UPDATE, DELETE.

use super::statement::{QueryMode, Renderer};
use crate::fields::Fields;
use crate::value::Value;

/// Render a predicate set as `key=value` terms joined by ` AND `.
///
/// Returns an empty string for an empty set; callers then omit `WHERE` entirely.
///
/// ```rust
/// use minidb::{Fields, builder::build_where};
///
/// let preds = Fields::new().with("id", 5).with("name", "Bob");
/// assert_eq!(build_where(&preds), "id=5 AND name='Bob'");
/// assert_eq!(build_where(&Fields::new()), "");
/// ```
pub fn build_where(predicates: &Fields) -> String {
    Renderer::new(QueryMode::Literal).where_clause(predicates)
}

/// Parameterized form of [`build_where`]: placeholders start at `$1`.
pub fn build_where_params(predicates: &Fields) -> (String, Vec<Value>) {
    let mut renderer = Renderer::new(QueryMode::Parameterized);
    let clause = renderer.where_clause(predicates);
    (clause, renderer.into_params())
}
