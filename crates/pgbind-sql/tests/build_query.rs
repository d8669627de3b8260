use pgbind_core::stmt::Value;
use pgbind_sql::{CompiledQuery, Query};
use pretty_assertions::assert_eq;

fn compiled(query_text: &str, params: Vec<Value>) -> CompiledQuery {
    CompiledQuery::new(query_text, params)
}

#[test]
fn raw_query_text_is_used_verbatim() {
    let query = Query::raw("SELECT id, username FROM app_user").compile();
    assert_eq!(query, compiled("SELECT id, username FROM app_user", vec![]));
}

#[test]
fn table_only() {
    let query = Query::table("app_user").compile();
    assert_eq!(query, compiled("SELECT * FROM app_user", vec![]));
}

#[test]
fn table_with_where_clause() {
    let query = Query::table("app_user")
        .filter("username = 'thinh'")
        .compile();
    assert_eq!(
        query,
        compiled("SELECT * FROM app_user WHERE username = 'thinh'", vec![])
    );
}

#[test]
fn selected_fields_are_aliased_without_spaces() {
    let query = Query::table("app_user")
        .fields(["id", "username", "createdAt"])
        .compile();
    assert_eq!(
        query.query_text,
        r#"SELECT id as "id",username as "username",createdAt as "createdAt" FROM app_user"#
    );
}

#[test]
fn empty_fields_and_sort_are_the_same_as_absent() {
    let query = Query::table("app_user")
        .fields(Vec::<String>::new())
        .sort_by(Vec::<String>::new())
        .compile();
    assert_eq!(query, Query::table("app_user").compile());
}

#[test]
fn limit_only() {
    let query = Query::table("app_user").fields(["id"]).limit(10).compile();
    assert_eq!(
        query,
        compiled(r#"SELECT id as "id" FROM app_user LIMIT $1"#, vec![Value::I64(10)])
    );
}

#[test]
fn offset_only() {
    let query = Query::table("app_user").fields(["id"]).offset(20).compile();
    assert_eq!(
        query,
        compiled(r#"SELECT id as "id" FROM app_user OFFSET $1"#, vec![Value::I64(20)])
    );
}

#[test]
fn limit_and_offset() {
    let query = Query::table("app_user")
        .fields(["id", "username"])
        .limit(10)
        .offset(20)
        .compile();
    assert_eq!(
        query,
        compiled(
            r#"SELECT id as "id",username as "username" FROM app_user LIMIT $1 OFFSET $2"#,
            vec![Value::I64(10), Value::I64(20)]
        )
    );
}

#[test]
fn zero_limit_and_offset_are_present() {
    let query = Query::table("app_user").limit(0).offset(0).compile();
    assert_eq!(
        query,
        compiled(
            "SELECT * FROM app_user LIMIT $1 OFFSET $2",
            vec![Value::I64(0), Value::I64(0)]
        )
    );
}

#[test]
fn pagination_overrides_limit_and_offset() {
    let query = Query::table("app_user")
        .limit(100)
        .offset(3)
        .page(2, 5)
        .compile();
    assert_eq!(
        query,
        compiled(
            "SELECT * FROM app_user LIMIT $1 OFFSET $2",
            vec![Value::I64(5), Value::I64(10)]
        )
    );
}

#[test]
fn first_page_has_zero_offset() {
    let query = Query::table("app_user").page(0, 25).compile();
    assert_eq!(query.params, vec![Value::I64(25), Value::I64(0)]);
}

#[test]
fn page_index_alone_does_not_page() {
    let mut query = Query::table("app_user").limit(7);
    query.page_index = Some(3);
    assert_eq!(
        query.compile(),
        compiled("SELECT * FROM app_user LIMIT $1", vec![Value::I64(7)])
    );
}

#[test]
fn named_params_and_unused_params() {
    let query = Query::table("app_user")
        .filter("type = :type AND createdAt > :createdAt")
        .param("type", 1)
        .param("createdAt", 1617871400249i64)
        .param("unusedParam", 0)
        .compile();
    assert_eq!(
        query,
        compiled(
            "SELECT * FROM app_user WHERE type = $1 AND createdAt > $2",
            vec![Value::I32(1), Value::I64(1617871400249)]
        )
    );
}

#[test]
fn single_named_param() {
    let query = Query::table("app_user")
        .filter("type = :type")
        .param("type", 1)
        .compile();
    assert_eq!(
        query,
        compiled("SELECT * FROM app_user WHERE type = $1", vec![Value::I32(1)])
    );
}

#[test]
fn sort_by_preserves_order() {
    let query = Query::table("app_user")
        .sort_by(["username|ASC", "createdAt|DESC"])
        .compile();
    assert_eq!(
        query.query_text,
        "SELECT * FROM app_user ORDER BY username ASC, createdAt DESC"
    );
}

#[test]
fn sort_entry_without_direction_passes_through() {
    let query = Query::table("app_user").sort_by(["username"]).compile();
    assert_eq!(query.query_text, "SELECT * FROM app_user ORDER BY username");
}

#[test]
fn full_query_allocates_paging_before_named_params() {
    let query = Query::table("app_user")
        .filter("createdAt >= :createdAt AND tsv @@ to_tsquery(:searchTerm)")
        .fields(["id", "username", "createdAt"])
        .sort_by(["username|ASC", "createdAt|DESC"])
        .page(2, 5)
        .param("searchTerm", "admin")
        .param("createdAt", 1617869191488i64)
        .compile();
    assert_eq!(
        query,
        compiled(
            concat!(
                r#"SELECT id as "id",username as "username",createdAt as "createdAt" FROM app_user "#,
                "WHERE createdAt >= $3 AND tsv @@ to_tsquery($4) ",
                "ORDER BY username ASC, createdAt DESC LIMIT $1 OFFSET $2"
            ),
            vec![
                Value::I64(5),
                Value::I64(10),
                Value::I64(1617869191488),
                Value::from("admin"),
            ]
        )
    );
}

#[test]
fn repeated_param_binds_once_per_occurrence() {
    let query = Query::table("event")
        .filter("starts_at > :at OR ends_at > :at OR created_at > :at")
        .param("at", 5)
        .compile();
    assert_eq!(
        query,
        compiled(
            "SELECT * FROM event WHERE starts_at > $1 OR ends_at > $2 OR created_at > $3",
            vec![Value::I32(5), Value::I32(5), Value::I32(5)]
        )
    );
}

#[test]
fn param_names_match_whole_tokens() {
    let query = Query::table("app_user")
        .filter("id = :id OR id = :id2")
        .param("id", 1)
        .param("id2", 2)
        .compile();
    assert_eq!(
        query,
        compiled(
            "SELECT * FROM app_user WHERE id = $1 OR id = $2",
            vec![Value::I32(1), Value::I32(2)]
        )
    );

    let query = Query::table("app_user")
        .filter("id = :id2")
        .param("id", 1)
        .compile();
    assert_eq!(
        query,
        compiled("SELECT * FROM app_user WHERE id = :id2", vec![])
    );
}

#[test]
fn param_names_beyond_ascii_identifiers() {
    let query = Query::table("t")
        .filter("name = :café AND id = :user.id")
        .param("café", "x")
        .param("user.id", 1)
        .compile();
    assert_eq!(
        query,
        compiled(
            "SELECT * FROM t WHERE name = $1 AND id = $2",
            vec![Value::from("x"), Value::I32(1)]
        )
    );

    // `é` continues the token, so `:caf` does not match the front of `:café`
    let query = Query::table("t")
        .filter("name = :café")
        .param("caf", "x")
        .compile();
    assert_eq!(query, compiled("SELECT * FROM t WHERE name = :café", vec![]));
}

#[test]
fn longest_param_name_wins() {
    let query = Query::table("t")
        .filter("id = :user.id OR owner = :user")
        .param("user", 7)
        .param("user.id", 1)
        .compile();
    assert_eq!(
        query,
        compiled(
            "SELECT * FROM t WHERE id = $1 OR owner = $2",
            vec![Value::I32(1), Value::I32(7)]
        )
    );
}

#[test]
fn casts_are_not_params() {
    let query = Query::table("app_user")
        .filter("created_at::date = :date")
        .param("date", "2021-04-08")
        .compile();
    assert_eq!(
        query,
        compiled(
            "SELECT * FROM app_user WHERE created_at::date = $1",
            vec![Value::from("2021-04-08")]
        )
    );
}

#[test]
fn query_text_with_fields_and_where_clause_is_wrapped() {
    let query = Query::raw("select * from app_user")
        .filter("createAt > :createAtFrom")
        .param("createAtFrom", "1624679104000")
        .fields(["id", "username", "createdAt"])
        .limit(10)
        .offset(20)
        .compile();
    assert_eq!(
        query,
        compiled(
            concat!(
                r#"SELECT id as "id",username as "username",createdAt as "createdAt" "#,
                "FROM (select * from app_user) AS T WHERE createAt > $3 LIMIT $1 OFFSET $2"
            ),
            vec![Value::I64(10), Value::I64(20), Value::from("1624679104000")]
        )
    );
}

#[test]
fn query_text_takes_priority_over_table() {
    let mut query = Query::raw("SELECT 1");
    query.table = Some("app_user".to_string());
    assert_eq!(query.compile().query_text, "SELECT 1");
}

#[test]
fn multiple_statements() {
    let query_text = "
      DELETE FROM app_user where id = :id1;
      DELETE FROM app_user where id = :id2;
    ";
    let query = Query::raw(query_text)
        .param("id1", "1")
        .param("id2", "2")
        .compile();
    assert_eq!(
        query,
        compiled(
            "
      DELETE FROM app_user where id = $1;
      DELETE FROM app_user where id = $2;
    ",
            vec![Value::from("1"), Value::from("2")]
        )
    );
}

#[test]
fn compile_is_deterministic() {
    let query = Query::table("app_user")
        .filter("a = :a AND b = :b")
        .param("b", 2)
        .param("a", 1)
        .page(1, 10);
    assert_eq!(query.compile(), query.compile());
}

#[test]
fn descriptor_from_json() {
    let query: Query = serde_json::from_str(
        r#"{
            "table": "app_user",
            "fields": ["id", "username"],
            "whereClause": "type = :type",
            "sortBy": ["username|ASC"],
            "pageIndex": 1,
            "rowsPerPage": 20,
            "params": { "type": 1 }
        }"#,
    )
    .unwrap();

    assert_eq!(
        query.compile(),
        compiled(
            r#"SELECT id as "id",username as "username" FROM app_user WHERE type = $3 ORDER BY username ASC LIMIT $1 OFFSET $2"#,
            vec![Value::I64(20), Value::I64(20), Value::I64(1)]
        )
    );
}
