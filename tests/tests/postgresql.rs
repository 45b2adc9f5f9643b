#![cfg(feature = "postgresql")]

//! Runs against a live PostgreSQL server named by `TABLEQL_TEST_DATABASE_URL`.
//! Skipped when the variable is unset.

use pretty_assertions::assert_eq;
use serde_json::json;
use tableql::Db;
use tests::TestIsolation;
use tokio_postgres::{Client, NoTls};

const URL_VAR: &str = "TABLEQL_TEST_DATABASE_URL";

struct Setup {
    client: Client,
    isolation: TestIsolation,
}

impl Setup {
    /// Connects and creates a fresh schema, or returns `None` when no server
    /// is configured.
    async fn new(ddl: &str) -> Option<Setup> {
        let Ok(url) = std::env::var(URL_VAR) else {
            eprintln!("{URL_VAR} not set; skipping");
            return None;
        };

        let (client, connection) = tokio_postgres::connect(&url, NoTls).await.unwrap();
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                eprintln!("connection error: {e}");
            }
        });

        let isolation = TestIsolation::new();
        client
            .batch_execute(&format!("{} {ddl}", isolation.setup_sql()))
            .await
            .unwrap();

        Some(Setup { client, isolation })
    }

    /// Builds an API over the test schema on its own connection, the way
    /// `Db::connect` callers do. The connection's search path is left alone.
    async fn db(&self) -> Db {
        let url = std::env::var(URL_VAR).unwrap();

        Db::builder()
            .schema_name(self.isolation.schema_name())
            .plural_root_fields(true)
            .connect(&url)
            .await
            .unwrap()
    }

    async fn teardown(self) {
        self.client
            .batch_execute(&self.isolation.teardown_sql())
            .await
            .unwrap();
    }
}

const AUTHOR_BOOK: &str = "
CREATE TABLE author (
    id integer PRIMARY KEY,
    name text NOT NULL,
    __version__ integer NOT NULL DEFAULT 1
);
CREATE TABLE book (
    id integer PRIMARY KEY,
    title character varying NOT NULL,
    author_id integer REFERENCES author (id),
    year integer,
    price numeric,
    published date,
    meta jsonb
);
INSERT INTO author (id, name) VALUES (1, 'Ada'), (2, 'Grace'), (3, 'Edsger');
INSERT INTO book (id, title, author_id, year, price, published, meta) VALUES
    (1, 'Notes', 1, 1843, 9.5, '1843-09-01', '{\"pages\": 65}'),
    (2, 'Compilers', 2, 1952, NULL, NULL, NULL),
    (3, 'Engines', 1, 1842, NULL, NULL, NULL),
    (4, 'Anonymous', NULL, 1900, NULL, NULL, NULL);
";

#[tokio::test]
async fn end_to_end() {
    let Some(setup) = Setup::new(AUTHOR_BOOK).await else {
        return;
    };
    let db = setup.db().await;

    assert!(!db.sdl().contains("__version__"));

    let response = db
        .execute(
            r#"{
                authors { name books(year: "1843") { title price published meta } }
                books { title author { name } }
            }"#,
        )
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    assert_eq!(
        response.data.into_json().unwrap(),
        json!({
            "authors": [
                {
                    "name": "Ada",
                    "books": [{
                        "title": "Notes",
                        "price": 9.5,
                        "published": "1843-09-01T00:00:00.000Z",
                        "meta": { "pages": 65 },
                    }],
                },
                { "name": "Grace", "books": [] },
                { "name": "Edsger", "books": [] },
            ],
            "books": [
                { "title": "Notes", "author": { "name": "Ada" } },
                { "title": "Compilers", "author": { "name": "Grace" } },
                { "title": "Engines", "author": { "name": "Ada" } },
                { "title": "Anonymous", "author": null },
            ],
        })
    );

    setup.teardown().await;
}

#[tokio::test]
async fn string_arguments_are_parsed_to_the_column_type() {
    let Some(setup) = Setup::new(AUTHOR_BOOK).await else {
        return;
    };
    let db = setup.db().await;

    let response = db
        .execute(r#"{ books(author_id: "1", year: "1842") { title } }"#)
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({ "books": [{ "title": "Engines" }] })
    );

    // An argument that does not parse is a field error
    let response = db.execute(r#"{ books(year: "soon") { title } }"#).await;
    assert_eq!(response.errors.len(), 1);

    setup.teardown().await;
}
