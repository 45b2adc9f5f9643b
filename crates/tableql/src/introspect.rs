use tableql_core::{
    driver::Operation,
    err,
    schema::db::{Catalog, ColumnInfo, ForeignKey, PrimaryKeyInfo},
    stmt::{Row, Value},
    Driver, Error, Result,
};

/// Every column of every table in schema `$1`.
pub const COLUMNS: &str = "\
SELECT
    table_name::text AS table_name,
    column_name::text AS column_name,
    data_type::text AS data_type
FROM information_schema.columns
WHERE table_schema::text = $1
ORDER BY table_name, column_name;";

/// Primary key columns of schema `$1`, in key order.
pub const PRIMARY_KEYS: &str = "\
SELECT
    t.table_name::text AS table_name,
    c.column_name::text AS column_name
FROM information_schema.key_column_usage AS c
JOIN information_schema.table_constraints AS t
    ON t.constraint_name = c.constraint_name
    AND t.table_schema = c.table_schema
WHERE t.table_schema::text = $1
    AND t.constraint_type = 'PRIMARY KEY'
ORDER BY t.table_name, c.ordinal_position;";

/// Foreign key edges declared in schema `$1`.
pub const FOREIGN_KEYS: &str = "\
SELECT
    tc.table_name::text AS table_name,
    kcu.column_name::text AS column_name,
    ccu.table_name::text AS foreign_table_name,
    ccu.column_name::text AS foreign_column_name
FROM information_schema.table_constraints AS tc
JOIN information_schema.key_column_usage AS kcu
    ON tc.constraint_name = kcu.constraint_name
    AND tc.table_schema = kcu.table_schema
JOIN information_schema.constraint_column_usage AS ccu
    ON ccu.constraint_name = tc.constraint_name
    AND ccu.table_schema = tc.table_schema
WHERE tc.constraint_type = 'FOREIGN KEY'
    AND tc.table_schema::text = $1
ORDER BY tc.table_name, kcu.column_name;";

/// Reads the tables, primary keys and foreign keys of one database schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Introspector {
    schema_name: String,

    /// Bookkeeping columns hidden from the catalog
    excluded_columns: Vec<String>,
}

impl Default for Introspector {
    fn default() -> Self {
        Self {
            schema_name: "public".to_string(),
            excluded_columns: vec!["__version__".to_string()],
        }
    }
}

impl Introspector {
    pub fn new() -> Introspector {
        Introspector::default()
    }

    pub fn schema_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.schema_name = name.into();
        self
    }

    /// Hide a column from every table. `__version__` is hidden by default.
    pub fn exclude_column(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !self.excluded_columns.contains(&name) {
            self.excluded_columns.push(name);
        }
        self
    }

    /// Replace the excluded column list.
    pub fn excluded_columns<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_columns = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn get_schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn get_excluded_columns(&self) -> &[String] {
        &self.excluded_columns
    }

    pub async fn introspect(&self, driver: &dyn Driver) -> Result<Catalog> {
        self.introspect_inner(driver)
            .await
            .map_err(|e| e.context(err!("failed to introspect schema `{}`", self.schema_name)))
    }

    async fn introspect_inner(&self, driver: &dyn Driver) -> Result<Catalog> {
        let columns = self.columns(driver).await?;

        let primary_keys = self
            .primary_keys(driver)
            .await?
            .into_iter()
            .filter(|pk| {
                let keep = !self.is_excluded(&pk.column);
                if !keep {
                    tracing::debug!(
                        table = %pk.table,
                        column = %pk.column,
                        "primary key on excluded column; dropping"
                    );
                }
                keep
            })
            .collect::<Vec<_>>();

        let foreign_keys = self
            .foreign_keys(driver)
            .await?
            .into_iter()
            .filter(|fk| {
                let keep =
                    !self.is_excluded(&fk.column) && !self.is_excluded(&fk.foreign_column);
                if !keep {
                    tracing::debug!(foreign_key = %fk, "foreign key on excluded column; dropping");
                }
                keep
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            schema = %self.schema_name,
            columns = columns.len(),
            primary_keys = primary_keys.len(),
            foreign_keys = foreign_keys.len(),
            "introspected schema"
        );

        Ok(Catalog::from_introspection(columns, primary_keys, foreign_keys)?
            .in_schema(&self.schema_name))
    }

    async fn columns(&self, driver: &dyn Driver) -> Result<Vec<ColumnInfo>> {
        let rows = self.query(driver, COLUMNS).await?;
        let mut ret = Vec::with_capacity(rows.len());

        for row in rows {
            let column = text(&row, "column", "column_name")?;

            if self.is_excluded(&column) {
                continue;
            }

            ret.push(ColumnInfo {
                table: text(&row, "column", "table_name")?,
                column,
                data_type: text(&row, "column", "data_type")?,
            });
        }

        Ok(ret)
    }

    async fn primary_keys(&self, driver: &dyn Driver) -> Result<Vec<PrimaryKeyInfo>> {
        self.query(driver, PRIMARY_KEYS)
            .await?
            .iter()
            .map(|row| {
                Ok(PrimaryKeyInfo::new(
                    text(row, "primary key", "table_name")?,
                    text(row, "primary key", "column_name")?,
                ))
            })
            .collect()
    }

    async fn foreign_keys(&self, driver: &dyn Driver) -> Result<Vec<ForeignKey>> {
        self.query(driver, FOREIGN_KEYS)
            .await?
            .iter()
            .map(|row| {
                Ok(ForeignKey::new(
                    text(row, "foreign key", "table_name")?,
                    text(row, "foreign key", "column_name")?,
                    text(row, "foreign key", "foreign_table_name")?,
                    text(row, "foreign key", "foreign_column_name")?,
                ))
            })
            .collect()
    }

    async fn query(&self, driver: &dyn Driver, sql: &str) -> Result<Vec<Row>> {
        driver
            .exec(Operation::query_sql(
                sql,
                vec![Value::from(self.schema_name.as_str())],
            ))
            .await
    }

    fn is_excluded(&self, column: &str) -> bool {
        self.excluded_columns.iter().any(|name| name == column)
    }
}

/// Reads a text field of a metadata row.
fn text(row: &Row, kind: &str, field: &str) -> Result<String> {
    match row.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(value) => Err(Error::invalid_result(format!(
            "{kind} row field `{field}` is {}, expected String",
            value.kind_name()
        ))),
        None => Err(Error::invalid_result(format!(
            "{kind} row has no `{field}` field"
        ))),
    }
}
