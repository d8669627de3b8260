mod support;
use support::*;

use pgbind::{execute, Db, Executor, LogRecord, Query, Response, Value};
use pretty_assertions::assert_eq;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

type Logged = Arc<Mutex<Vec<(String, Vec<Value>, u64)>>>;

fn recording_db(driver: &MockDriver) -> (Db, Logged) {
    let logged = Logged::default();
    let sink = logged.clone();

    let db = Db::builder()
        .log(move |record: &LogRecord<'_>| {
            sink.lock().unwrap().push((
                record.query_text.to_string(),
                record.params.to_vec(),
                record.duration,
            ));
        })
        .build(driver.clone());

    (db, logged)
}

#[tokio::test]
async fn passes_statement_and_params_through() {
    let driver = MockDriver::new();
    driver.respond(Response::from_rows(vec![row([("id", Value::I64(1))])]));
    let db = Db::new(driver.clone());

    let response = db
        .execute("SELECT * FROM app_user WHERE id = $1", &[Value::I64(1)])
        .await
        .unwrap();

    assert_eq!(response.rows, vec![row([("id", Value::I64(1))])]);
    assert_eq!(
        driver.events(),
        vec![pool("SELECT * FROM app_user WHERE id = $1", vec![Value::I64(1)])]
    );
}

#[tokio::test(start_paused = true)]
async fn logs_statement_with_duration() {
    let driver = MockDriver::new();
    driver.latency(Duration::from_millis(1));
    let (db, logged) = recording_db(&driver);

    db.execute("SELECT 1", &[Value::from("a")]).await.unwrap();

    assert_eq!(
        *logged.lock().unwrap(),
        vec![("SELECT 1".to_string(), vec![Value::from("a")], 1)]
    );
}

#[tokio::test(start_paused = true)]
async fn duration_is_rounded_to_whole_millis() {
    let driver = MockDriver::new();
    driver.latency(Duration::from_micros(2600));
    let (db, logged) = recording_db(&driver);

    db.execute("SELECT 1", &[]).await.unwrap();

    assert_eq!(logged.lock().unwrap()[0].2, 3);
}

#[tokio::test]
async fn failure_is_returned_unchanged_and_not_logged() {
    let driver = MockDriver::new();
    driver.fail_on("SELECT");
    let (db, logged) = recording_db(&driver);

    let err = db.execute("SELECT broken", &[]).await.unwrap_err();

    assert!(err.is_driver_operation_failed());
    assert_eq!(err.to_string(), "mock failure: SELECT broken");
    assert!(logged.lock().unwrap().is_empty());
}

#[tokio::test]
async fn execute_without_logger() {
    let driver = MockDriver::new();

    execute(&driver, "DELETE FROM t", &[], None).await.unwrap();

    assert_eq!(driver.statements(), vec!["DELETE FROM t"]);
}

#[tokio::test]
async fn execute_query_compiles_descriptor() {
    let driver = MockDriver::new();
    driver.respond(Response::from_rows(vec![
        row([("id", Value::I64(1))]),
        row([("id", Value::I64(2))]),
    ]));
    let (db, logged) = recording_db(&driver);

    let query = Query::table("app_user")
        .fields(["id"])
        .filter("type = :type")
        .param("type", 1)
        .page(2, 5);
    let rows = db.execute_query(&query).await.unwrap();

    assert_eq!(rows.len(), 2);

    let sql = r#"SELECT id as "id" FROM app_user WHERE type = $3 LIMIT $1 OFFSET $2"#;
    let params = vec![Value::I64(5), Value::I64(10), Value::I32(1)];
    assert_eq!(driver.events(), vec![pool(sql, params.clone())]);
    assert_eq!(logged.lock().unwrap()[0].0, sql);
    assert_eq!(logged.lock().unwrap()[0].1, params);
}

#[tokio::test]
async fn count_ignores_sort_and_paging() {
    let driver = MockDriver::new();
    driver.respond(Response::from_rows(vec![row([("count", Value::I64(42))])]));
    let db = Db::new(driver.clone());

    let query = Query::table("app_user")
        .filter("type = :type")
        .param("type", 1)
        .sort_by(["username|ASC"])
        .limit(10)
        .offset(20);
    let count = db.count(&query).await.unwrap();

    assert_eq!(count, 42);
    assert_eq!(
        driver.events(),
        vec![pool(
            "SELECT COUNT(*) AS count FROM (SELECT * FROM app_user WHERE type = $1) AS T",
            vec![Value::I32(1)]
        )]
    );
}

#[tokio::test]
async fn count_without_rows_is_zero() {
    let driver = MockDriver::new();
    let db = Db::new(driver);

    assert_eq!(db.count(&Query::table("app_user")).await.unwrap(), 0);
}
