use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use tableql::Db;
use tableql_core::{row, stmt::Value};
use tests::{fixture, Fixture, MemoryDriver, TestDb};

#[tokio::test]
async fn authors_with_books() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;

    let data = t
        .query("{ authors { id name books { title } } }")
        .await;

    assert_eq!(
        data,
        json!({
            "authors": [
                { "id": "1", "name": "Ada", "books": [{ "title": "Notes" }, { "title": "Engines" }] },
                { "id": "2", "name": "Grace", "books": [{ "title": "Compilers" }] },
                { "id": "3", "name": "Edsger", "books": [] },
            ]
        })
    );

    // One query for the root field, one batch for every author's books
    assert_eq!(t.log.selects_from("author"), 1);
    assert_eq!(t.log.selects_from("book"), 1);
    assert_eq!(t.log.len(), 2);
    assert_eq!(t.log.sql_queries(), 0);
}

#[tokio::test]
async fn queries_name_the_introspected_schema() {
    let mut builder = Db::builder();
    builder.schema_name("library").plural_root_fields(true);

    let t = TestDb::with_builder(
        MemoryDriver::new(fixture::author_book()).schema_name("library"),
        &builder,
    )
    .await;

    let data = t.query("{ authors { name books { title } } }").await;
    assert_eq!(data["authors"][1], json!({ "name": "Grace", "books": [{ "title": "Compilers" }] }));

    let selects = t.log.selects();
    assert_eq!(selects.len(), 2);
    for select in &selects {
        assert_eq!(select.schema.as_deref(), Some("library"), "{select:?}");
    }
}

#[tokio::test]
async fn rows_come_back_in_key_order() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book()).reversed()).await;

    let data = t.query("{ authors { name books { title } } }").await;

    assert_eq!(
        data,
        json!({
            "authors": [
                { "name": "Edsger", "books": [] },
                { "name": "Grace", "books": [{ "title": "Compilers" }] },
                { "name": "Ada", "books": [{ "title": "Engines" }, { "title": "Notes" }] },
            ]
        })
    );
}

#[tokio::test]
async fn books_with_author() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;

    let data = t.query("{ books { title year author { name } } }").await;

    assert_eq!(
        data,
        json!({
            "books": [
                { "title": "Notes", "year": 1843, "author": { "name": "Ada" } },
                { "title": "Compilers", "year": 1952, "author": { "name": "Grace" } },
                { "title": "Engines", "year": 1842, "author": { "name": "Ada" } },
                { "title": "Anonymous", "year": 1900, "author": null },
            ]
        })
    );

    // The null key is never sent and Ada is asked for once
    let selects = t.log.selects();
    assert_eq!(selects.len(), 2);
    assert_eq!(selects[1].table, "author");
    assert_eq!(
        selects[1].filter,
        Some(tableql_core::stmt::Expr::in_list(
            "id",
            vec![Value::from(1), Value::from(2)]
        ))
    );
}

#[tokio::test]
async fn root_field_arguments_filter() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;

    let data = t
        .query(r#"{ books(author_id: "1") { title } authors(name: "Nobody") { id } }"#)
        .await;

    assert_eq!(
        data,
        json!({
            "books": [{ "title": "Notes" }, { "title": "Engines" }],
            "authors": [],
        })
    );
}

#[tokio::test]
async fn null_arguments_do_not_filter() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;

    let data = t.query("{ authors(name: null) { name } }").await;

    assert_eq!(
        data,
        json!({ "authors": [{ "name": "Ada" }, { "name": "Grace" }, { "name": "Edsger" }] })
    );
}

#[tokio::test]
async fn list_field_arguments_filter() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;

    let data = t
        .query(r#"{ authors(name: "Ada") { books(year: "1843") { title } } }"#)
        .await;

    assert_eq!(
        data,
        json!({ "authors": [{ "books": [{ "title": "Notes" }] }] })
    );
}

#[tokio::test]
async fn aliased_fields_with_different_arguments() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;

    let data = t
        .query(
            r#"{
                authors(name: "Ada") {
                    early: books(year: "1842") { title }
                    all: books { title }
                }
            }"#,
        )
        .await;

    assert_eq!(
        data,
        json!({
            "authors": [{
                "early": [{ "title": "Engines" }],
                "all": [{ "title": "Notes" }, { "title": "Engines" }],
            }]
        })
    );

    // Different arguments never share a batch
    assert_eq!(t.log.selects_from("book"), 2);
}

#[tokio::test]
async fn variables() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;

    let request = tableql::async_graphql::Request::new(
        "query Q($year: String) { books(year: $year) { title } }",
    )
    .variables(tableql::async_graphql::Variables::from_json(
        json!({ "year": "1952" }),
    ));

    let response = t.db.execute(request).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({ "books": [{ "title": "Compilers" }] })
    );
}

#[tokio::test]
async fn self_reference() {
    let t = TestDb::new(MemoryDriver::new(fixture::employee())).await;

    let data = t
        .query("{ employees { name employee { name } employees { name } } }")
        .await;

    assert_eq!(
        data,
        json!({
            "employees": [
                { "name": "Root", "employee": null, "employees": [{ "name": "Lead" }] },
                { "name": "Lead", "employee": { "name": "Root" }, "employees": [{ "name": "Dev" }, { "name": "Ops" }] },
                { "name": "Dev", "employee": { "name": "Lead" }, "employees": [] },
                { "name": "Ops", "employee": { "name": "Lead" }, "employees": [] },
            ]
        })
    );

    // Root list, managers, reports
    assert_eq!(t.log.selects_from("employee"), 3);
}

#[tokio::test]
async fn deep_nesting_batches_each_level() {
    let t = TestDb::new(MemoryDriver::new(fixture::employee())).await;

    let data = t
        .query(r#"{ employees(name: "Root") { employees { employees { name employee { name } } } } }"#)
        .await;

    assert_eq!(
        data,
        json!({
            "employees": [{
                "employees": [{
                    "employees": [
                        { "name": "Dev", "employee": { "name": "Lead" } },
                        { "name": "Ops", "employee": { "name": "Lead" } },
                    ]
                }]
            }]
        })
    );

    assert_eq!(t.log.selects_from("employee"), 4);
}

#[tokio::test]
async fn mutual_references() {
    let t = TestDb::new(MemoryDriver::new(fixture::team_player())).await;

    let data = t
        .query(
            "{
                teams { name player { name } players { name } }
                players { name team { name } teams { name } }
            }",
        )
        .await;

    assert_eq!(
        data,
        json!({
            "teams": [
                { "name": "Red", "player": { "name": "Bob" }, "players": [{ "name": "Ann" }, { "name": "Bob" }] },
                { "name": "Blue", "player": { "name": "Cy" }, "players": [{ "name": "Cy" }] },
            ],
            "players": [
                { "name": "Ann", "team": { "name": "Red" }, "teams": [] },
                { "name": "Bob", "team": { "name": "Red" }, "teams": [{ "name": "Red" }] },
                { "name": "Cy", "team": { "name": "Blue" }, "teams": [{ "name": "Blue" }] },
            ]
        })
    );
}

#[tokio::test]
async fn requests_do_not_share_cached_rows() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;
    let query = "{ authors { books { title } } }";

    let first = t.query(query).await;
    assert_eq!(t.log.selects_from("book"), 1);

    let second = t.query(query).await;
    assert_eq!(t.log.selects_from("book"), 2);

    assert_eq!(first, second);
}

#[tokio::test]
async fn failed_batch_is_a_field_error() {
    let driver = MemoryDriver::new(fixture::author_book());
    driver.fail_selects("book", 1);
    let t = TestDb::new(driver).await;

    let response = t.db.execute("{ authors { name books { title } } }").await;

    assert_eq!(
        response.data.into_json().unwrap(),
        json!({
            "authors": [
                { "name": "Ada", "books": null },
                { "name": "Grace", "books": null },
                { "name": "Edsger", "books": null },
            ]
        })
    );

    // Every waiter of the failed batch reports it
    assert_eq!(response.errors.len(), 3);
    for error in &response.errors {
        assert_eq!(error.message, "injected failure selecting from `book`");
    }

    assert_eq!(t.log.selects_from("book"), 1);
}

#[tokio::test]
async fn failed_root_field_keeps_siblings() {
    let driver = MemoryDriver::new(fixture::author_book());
    driver.fail_selects("book", 1);
    let t = TestDb::new(driver).await;

    let response = t.db.execute("{ books { title } authors { name } }").await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({
            "books": null,
            "authors": [{ "name": "Ada" }, { "name": "Grace" }, { "name": "Edsger" }],
        })
    );
}

#[tokio::test]
async fn sdl() {
    let t = TestDb::new(MemoryDriver::new(fixture::author_book())).await;
    let sdl = t.db.sdl();

    assert!(sdl.contains("type author"), "{sdl}");
    assert!(sdl.contains("type book"), "{sdl}");
    assert!(sdl.contains("author: author"), "{sdl}");
    assert!(sdl.contains("author_id: String"), "{sdl}");
    assert!(sdl.contains("[book]"), "{sdl}");
    assert!(sdl.contains("id: ID"), "{sdl}");
    assert!(sdl.contains("year: Int"), "{sdl}");
    assert!(sdl.contains("Generated from table `book`"), "{sdl}");

    assert!(!sdl.contains("__version__"), "{sdl}");
    assert!(!sdl.contains("scalar DateTime"), "{sdl}");
    assert!(!sdl.contains("scalar JSON"), "{sdl}");
}

fn events() -> Fixture {
    Fixture::new()
        .table(
            "event",
            &[
                ("id", "integer"),
                ("at", "timestamp with time zone"),
                ("day", "date"),
                ("payload", "jsonb"),
                ("price", "numeric"),
                ("visible", "boolean"),
            ],
            Some("id"),
        )
        .rows(
            "event",
            [
                row! {
                    "id" => 1,
                    "at" => Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
                    "day" => NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
                    "payload" => json!({ "tags": ["launch"] }),
                    "price" => 1.5,
                    "visible" => true,
                },
                row! {
                    "id" => 2,
                    "at" => Value::Null,
                    "day" => Value::Null,
                    "payload" => Value::Null,
                    "price" => Value::Null,
                    "visible" => false,
                },
            ],
        )
}

#[tokio::test]
async fn scalars() {
    let t = TestDb::new(MemoryDriver::new(events())).await;

    let data = t
        .query("{ events { id at day payload price visible } }")
        .await;

    assert_eq!(
        data,
        json!({
            "events": [
                {
                    "id": "1",
                    "at": "2024-05-06T07:08:09.000Z",
                    "day": "2024-05-06T00:00:00.000Z",
                    "payload": { "tags": ["launch"] },
                    "price": 1.5,
                    "visible": true,
                },
                {
                    "id": "2",
                    "at": null,
                    "day": null,
                    "payload": null,
                    "price": null,
                    "visible": false,
                },
            ]
        })
    );

    let sdl = t.db.sdl();
    assert!(sdl.contains("scalar DateTime"), "{sdl}");
    assert!(sdl.contains("scalar JSON"), "{sdl}");
}

#[tokio::test]
async fn singular_root_fields_by_default() {
    let t = TestDb::with_builder(
        MemoryDriver::new(fixture::author_book()),
        &Db::builder(),
    )
    .await;

    let data = t.query(r#"{ author(name: "Grace") { name books { title } } }"#).await;

    assert_eq!(
        data,
        json!({ "author": [{ "name": "Grace", "books": [{ "title": "Compilers" }] }] })
    );
}
