use super::*;
use crate::builder::StatementKind;
use crate::value::Value;
use std::sync::Mutex;

// ── Recording executor for tests ──

#[derive(Default)]
struct MockExecutor {
    log: Mutex<Vec<Statement>>,
    rows: Vec<Row>,
    next_id: Option<i64>,
    fail: bool,
}

impl MockExecutor {
    fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn sql_log(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.sql().to_string())
            .collect()
    }

    fn last(&self) -> Statement {
        self.log.lock().unwrap().last().cloned().expect("no statement")
    }
}

impl Executor for MockExecutor {
    async fn execute(&self, statement: &Statement) -> DbResult<ExecResult> {
        self.log.lock().unwrap().push(statement.clone());
        if self.fail {
            return Err(DbError::Connection("connection lost".to_string()));
        }
        if statement.kind().returns_rows() {
            return Ok(ExecResult::Rows(self.rows.clone()));
        }
        Ok(ExecResult::Affected {
            rows_affected: 1,
            last_insert_id: self
                .next_id
                .filter(|_| statement.kind() == StatementKind::Insert),
        })
    }
}

fn user(id: i64, name: &str) -> Row {
    Row::new(Fields::new().with("id", id).with("name", name))
}

fn three_users() -> Vec<Row> {
    vec![user(1, "Alice"), user(2, "Bob"), user(3, "Carol")]
}

fn id_of(row: &Row) -> i64 {
    row.get("id").and_then(Value::as_i64).unwrap()
}

// ==================== Configuration ====================

#[test]
fn test_is_configured() {
    let exec = MockExecutor::default();
    assert!(TableAdapter::new("users", &exec).is_configured());
    assert!(!TableAdapter::new("", &exec).is_configured());
    assert_eq!(TableAdapter::new("", &exec).table_name(), None);
}

#[tokio::test]
async fn test_unconfigured_adapter_is_silent_noop() {
    let exec = MockExecutor::with_rows(three_users());
    let mut adapter = TableAdapter::new("", &exec);
    let data = Fields::new().with("name", "Alice");
    let preds = Fields::new().with("id", 1);

    adapter.select(&preds).await.unwrap();
    assert_eq!(adapter.insert(&data).await.unwrap(), None);
    adapter.update(&data, &preds).await.unwrap();
    adapter.delete(&preds).await.unwrap();

    assert!(exec.sql_log().is_empty());
    assert_eq!(adapter.row_count(), 0);
    assert_eq!(adapter.cursor(), None);
}

// ==================== CRUD ====================

#[tokio::test]
async fn test_select_issues_wildcard_select() {
    let exec = MockExecutor::with_rows(three_users());
    let mut adapter = TableAdapter::new("users", &exec);

    adapter.select(&Fields::new()).await.unwrap();
    adapter.select(&Fields::new().with("name", "Bob")).await.unwrap();

    assert_eq!(
        exec.sql_log(),
        vec![
            "SELECT * FROM users;".to_string(),
            "SELECT * FROM users WHERE name='Bob';".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_select_buffers_rows_and_resets_cursor() {
    let exec = MockExecutor::with_rows(three_users());
    let mut adapter = TableAdapter::new("users", &exec);

    adapter.select(&Fields::new()).await.unwrap();
    assert_eq!(adapter.row_count(), 3);
    assert_eq!(adapter.cursor(), Some(0));
    assert_eq!(adapter.get_results(), three_users().as_slice());

    adapter.last_row();
    adapter.select(&Fields::new()).await.unwrap();
    // replaced, not appended
    assert_eq!(adapter.row_count(), 3);
    assert_eq!(adapter.cursor(), Some(0));
}

#[tokio::test]
async fn test_select_with_no_rows_clears_cursor() {
    let exec = MockExecutor::default();
    let mut adapter = TableAdapter::new("users", &exec);

    adapter.select(&Fields::new()).await.unwrap();
    assert_eq!(adapter.row_count(), 0);
    assert_eq!(adapter.cursor(), None);
    assert_eq!(adapter.last_row_index(), None);
}

#[tokio::test]
async fn test_insert_returns_last_insert_id() {
    let exec = MockExecutor {
        next_id: Some(42),
        ..Default::default()
    };
    let adapter = TableAdapter::new("users", &exec);
    let id = adapter
        .insert(&Fields::new().with("name", "Alice").with("age", 30))
        .await
        .unwrap();

    assert_eq!(id, Some(42));
    assert_eq!(
        exec.last().sql(),
        "INSERT INTO users ( name, age ) VALUES ( 'Alice', 30 );"
    );
}

#[tokio::test]
async fn test_statements_carry_the_adapter_table() {
    let exec = MockExecutor::default();
    let adapter = TableAdapter::new("public.users", &exec);

    adapter.insert(&Fields::new().with("name", "Alice")).await.unwrap();
    assert_eq!(exec.last().table(), "public.users");
    adapter.delete(&Fields::new()).await.unwrap();
    assert_eq!(exec.last().table(), "public.users");
}

#[tokio::test]
async fn test_update_and_delete() {
    let exec = MockExecutor::default();
    let adapter = TableAdapter::new("users", &exec);

    adapter
        .update(&Fields::new().with("age", 31), &Fields::new().with("id", 5))
        .await
        .unwrap();
    adapter.delete(&Fields::new().with("id", 5)).await.unwrap();

    assert_eq!(
        exec.sql_log(),
        vec![
            "UPDATE users SET age=31 WHERE id=5;".to_string(),
            "DELETE FROM users WHERE id=5;".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_empty_data_is_rejected_before_execution() {
    let exec = MockExecutor::default();
    let adapter = TableAdapter::new("users", &exec);

    let err = adapter.insert(&Fields::new()).await.unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    let err = adapter
        .update(&Fields::new(), &Fields::new().with("id", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    assert!(exec.sql_log().is_empty());
}

#[tokio::test]
async fn test_parameterized_mode() {
    let exec = MockExecutor::default();
    let adapter = TableAdapter::new("users", &exec).with_mode(QueryMode::Parameterized);

    adapter
        .update(&Fields::new().with("name", "Bob"), &Fields::new().with("id", 5))
        .await
        .unwrap();

    let stmt = exec.last();
    assert_eq!(stmt.sql(), "UPDATE users SET name=$1 WHERE id=$2;");
    assert_eq!(stmt.params(), &[Value::from("Bob"), Value::Int(5)]);
    assert_eq!(adapter.mode(), QueryMode::Parameterized);
}

#[tokio::test]
async fn test_execution_failure_propagates_and_keeps_buffer() {
    let ok = MockExecutor::with_rows(three_users());
    let mut adapter = TableAdapter::new("users", &ok);
    adapter.select(&Fields::new()).await.unwrap();
    adapter.next_row();

    let failing = MockExecutor::failing();
    let mut broken = TableAdapter::new("users", &failing);
    assert!(broken.select(&Fields::new()).await.is_err());
    assert!(broken.insert(&Fields::new().with("a", 1)).await.is_err());
    assert!(broken.delete(&Fields::new()).await.is_err());
    assert_eq!(broken.row_count(), 0);

    // the healthy adapter is unaffected
    assert_eq!(adapter.cursor(), Some(1));
}

// ==================== Cursor ====================

async fn loaded(exec: &MockExecutor) -> TableAdapter<&MockExecutor> {
    let mut adapter = TableAdapter::new("users", exec);
    adapter.select(&Fields::new()).await.unwrap();
    adapter
}

#[tokio::test]
async fn test_next_row_walks_to_last_then_clamps() {
    let exec = MockExecutor::with_rows(three_users());
    let mut adapter = loaded(&exec).await;

    for _ in 0..adapter.row_count() - 1 {
        adapter.next_row();
    }
    assert_eq!(adapter.cursor(), adapter.last_row_index());
    assert_eq!(id_of(adapter.current_row().unwrap()), 3);

    adapter.next_row();
    assert_eq!(adapter.cursor(), Some(2));
}

#[tokio::test]
async fn test_previous_row_clamps_at_first() {
    let exec = MockExecutor::with_rows(three_users());
    let mut adapter = loaded(&exec).await;

    adapter.previous_row();
    assert_eq!(adapter.cursor(), Some(0));

    adapter.last_row();
    adapter.previous_row();
    assert_eq!(id_of(adapter.current_row().unwrap()), 2);
}

#[tokio::test]
async fn test_first_and_last_row() {
    let exec = MockExecutor::with_rows(three_users());
    let mut adapter = loaded(&exec).await;

    adapter.last_row();
    assert_eq!(adapter.cursor(), Some(2));
    adapter.first_row();
    assert_eq!(adapter.cursor(), Some(adapter.first_row_index()));
}

#[tokio::test]
async fn test_row_at_ignores_out_of_range() {
    let exec = MockExecutor::with_rows(three_users());
    let mut adapter = loaded(&exec).await;

    adapter.row_at(2);
    assert_eq!(adapter.cursor(), Some(2));
    adapter.row_at(3);
    assert_eq!(adapter.cursor(), Some(2));
    adapter.row_at(usize::MAX);
    assert_eq!(adapter.cursor(), Some(2));
}

#[tokio::test]
async fn test_get_row_at_and_in_range() {
    let exec = MockExecutor::with_rows(three_users());
    let adapter = loaded(&exec).await;

    assert!(adapter.in_range(0));
    assert!(adapter.in_range(2));
    assert!(!adapter.in_range(3));
    assert_eq!(adapter.get_row_at(1).map(id_of), Some(2));
    assert!(adapter.get_row_at(3).is_none());
    // reading does not move the cursor
    assert_eq!(adapter.cursor(), Some(0));
}

#[test]
fn test_cursor_on_empty_buffer() {
    let exec = MockExecutor::default();
    let mut adapter = TableAdapter::new("users", &exec);

    adapter.first_row();
    adapter.last_row();
    adapter.next_row();
    adapter.previous_row();
    adapter.row_at(0);
    assert_eq!(adapter.cursor(), None);
    assert!(!adapter.in_range(0));
    assert!(adapter.get_row_at(0).is_none());

    let err = adapter.current_row().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert!(matches!(err, DbError::OutOfBounds { index: 0, len: 0 }));
}
