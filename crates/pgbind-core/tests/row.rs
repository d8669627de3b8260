use pgbind_core::{
    driver::{Response, Row},
    Value,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn user() -> Row {
    [
        ("id", Value::I64(5)),
        ("username", Value::from("ada")),
        ("deleted_at", Value::Null),
    ]
    .into_iter()
    .collect()
}

#[test]
fn columns_keep_server_order() {
    let row = user();

    let names: Vec<_> = row.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["id", "username", "deleted_at"]);
    assert_eq!(row.get_index(1), Some(&Value::from("ada")));
    assert_eq!(row.get("missing"), None);
}

#[test]
fn repeated_column_overwrites_in_place() {
    let mut row = user();
    row.insert("id", Value::I64(6));

    assert_eq!(row.len(), 3);
    assert_eq!(row.get_index(0), Some(&Value::I64(6)));
}

#[test]
fn take_removes_column() {
    let mut row = user();

    assert_eq!(row.take("username"), Some(Value::from("ada")));
    assert_eq!(row.take("username"), None);
    assert_eq!(row.len(), 2);
}

#[test]
fn row_to_json() {
    assert_eq!(
        user().to_json(),
        json!({ "id": 5, "username": "ada", "deleted_at": null })
    );
}

#[test]
fn response_counts_rows() {
    let response = Response::from_rows(vec![user(), user()]);
    assert_eq!(response.row_count, 2);
    assert_eq!(response.clone().into_first_row(), Some(user()));
    assert_eq!(response.into_rows().len(), 2);

    let response = Response::count(3);
    assert!(response.rows.is_empty());
    assert_eq!(response.row_count, 3);
    assert_eq!(Response::empty().into_first_row(), None);
}
