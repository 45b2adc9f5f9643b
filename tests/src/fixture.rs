use tableql_core::{
    row,
    schema::db::ForeignKey,
    stmt::{Row, Value},
};

/// A declarative database: tables with typed columns and rows, plus foreign
/// keys. [`MemoryDriver`](crate::MemoryDriver) serves it.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub tables: Vec<FixtureTable>,
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone)]
pub struct FixtureTable {
    pub name: String,

    /// `(column, data type)` pairs
    pub columns: Vec<(String, String)>,

    pub primary_key: Option<String>,

    pub rows: Vec<Row>,
}

impl Fixture {
    pub fn new() -> Fixture {
        Fixture::default()
    }

    /// Adds a table. `columns` are `(name, data type)` pairs.
    pub fn table(mut self, name: &str, columns: &[(&str, &str)], primary_key: Option<&str>) -> Self {
        self.tables.push(FixtureTable {
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|(column, ty)| (column.to_string(), ty.to_string()))
                .collect(),
            primary_key: primary_key.map(str::to_string),
            rows: vec![],
        });
        self
    }

    pub fn foreign_key(mut self, table: &str, column: &str, foreign_table: &str, foreign_column: &str) -> Self {
        self.foreign_keys
            .push(ForeignKey::new(table, column, foreign_table, foreign_column));
        self
    }

    /// Appends rows to `table`.
    ///
    /// # Panics
    ///
    /// If the table was not declared.
    pub fn rows(mut self, table: &str, rows: impl IntoIterator<Item = Row>) -> Self {
        let Some(t) = self.tables.iter_mut().find(|t| t.name == table) else {
            panic!("fixture has no table `{table}`");
        };
        t.rows.extend(rows);
        self
    }

    pub fn get_table(&self, name: &str) -> Option<&FixtureTable> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// Three authors and four books. Ada wrote two books, Grace one, Edsger none.
/// One book has no author.
pub fn author_book() -> Fixture {
    Fixture::new()
        .table(
            "author",
            &[("id", "integer"), ("name", "text"), ("__version__", "integer")],
            Some("id"),
        )
        .table(
            "book",
            &[
                ("id", "integer"),
                ("title", "character varying"),
                ("author_id", "integer"),
                ("year", "integer"),
            ],
            Some("id"),
        )
        .foreign_key("book", "author_id", "author", "id")
        .rows(
            "author",
            [
                row! { "id" => 1, "name" => "Ada", "__version__" => 1 },
                row! { "id" => 2, "name" => "Grace", "__version__" => 1 },
                row! { "id" => 3, "name" => "Edsger", "__version__" => 1 },
            ],
        )
        .rows(
            "book",
            [
                row! { "id" => 1, "title" => "Notes", "author_id" => 1, "year" => 1843 },
                row! { "id" => 2, "title" => "Compilers", "author_id" => 2, "year" => 1952 },
                row! { "id" => 3, "title" => "Engines", "author_id" => 1, "year" => 1842 },
                row! { "id" => 4, "title" => "Anonymous", "author_id" => Value::Null, "year" => 1900 },
            ],
        )
}

/// Employees reporting to a manager in the same table.
pub fn employee() -> Fixture {
    Fixture::new()
        .table(
            "employee",
            &[("id", "integer"), ("name", "text"), ("manager_id", "integer")],
            Some("id"),
        )
        .foreign_key("employee", "manager_id", "employee", "id")
        .rows(
            "employee",
            [
                row! { "id" => 1, "name" => "Root", "manager_id" => Value::Null },
                row! { "id" => 2, "name" => "Lead", "manager_id" => 1 },
                row! { "id" => 3, "name" => "Dev", "manager_id" => 2 },
                row! { "id" => 4, "name" => "Ops", "manager_id" => 2 },
            ],
        )
}

/// Teams and players referencing each other.
pub fn team_player() -> Fixture {
    Fixture::new()
        .table(
            "team",
            &[("id", "integer"), ("name", "text"), ("captain_id", "integer")],
            Some("id"),
        )
        .table(
            "player",
            &[("id", "integer"), ("name", "text"), ("team_id", "integer")],
            Some("id"),
        )
        .foreign_key("team", "captain_id", "player", "id")
        .foreign_key("player", "team_id", "team", "id")
        .rows(
            "team",
            [
                row! { "id" => 1, "name" => "Red", "captain_id" => 2 },
                row! { "id" => 2, "name" => "Blue", "captain_id" => 3 },
            ],
        )
        .rows(
            "player",
            [
                row! { "id" => 1, "name" => "Ann", "team_id" => 1 },
                row! { "id" => 2, "name" => "Bob", "team_id" => 1 },
                row! { "id" => 3, "name" => "Cy", "team_id" => 2 },
            ],
        )
}
