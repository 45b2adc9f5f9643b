use super::{Column, ColumnInfo, ColumnRef, ForeignKey, PrimaryKeyInfo, Table, TableId};
use crate::{Error, Result};

use indexmap::{IndexMap, IndexSet};

/// Tables, columns, primary keys and foreign keys of one database schema.
///
/// Built once at startup from introspection rows and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Catalog {
    /// Database schema the tables were read from. Statements against the
    /// catalog's tables are qualified with it.
    pub schema: Option<String>,

    /// Tables, ordered by name
    pub tables: Vec<Table>,

    /// Foreign key edges between the tables
    pub foreign_keys: Vec<ForeignKey>,

    /// Maps table names to identifiers
    #[cfg_attr(feature = "serde", serde(skip))]
    table_lookup: IndexMap<String, TableId>,
}

impl Catalog {
    pub fn in_schema(mut self, schema: impl Into<String>) -> Catalog {
        self.schema = Some(schema.into());
        self
    }

    /// Assembles a catalog from the three introspection results.
    ///
    /// Columns are grouped by table. A table keeps the first primary key
    /// column reported for it. Every foreign key must point between columns
    /// the column catalog knows about.
    pub fn from_introspection(
        columns: Vec<ColumnInfo>,
        primary_keys: Vec<PrimaryKeyInfo>,
        foreign_keys: Vec<ForeignKey>,
    ) -> Result<Catalog> {
        let mut grouped: IndexMap<String, Vec<Column>> = IndexMap::new();

        for info in columns {
            grouped.entry(info.table).or_default().push(Column {
                name: info.column,
                data_type: info.data_type,
            });
        }

        grouped.sort_keys();

        let mut catalog = Catalog::default();

        for (index, (name, mut columns)) in grouped.into_iter().enumerate() {
            columns.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));
            columns.dedup_by(|lhs, rhs| lhs.name == rhs.name);

            let id = TableId(index);
            catalog.table_lookup.insert(name.clone(), id);
            catalog.tables.push(Table {
                id,
                name,
                columns,
                primary_key: None,
            });
        }

        for pk in primary_keys {
            let Some(id) = catalog.table_lookup.get(&pk.table).copied() else {
                tracing::debug!(table = %pk.table, "primary key for a table without columns; ignoring");
                continue;
            };

            let table = &mut catalog.tables[id.0];

            if table.primary_key.is_some() {
                continue;
            }

            if !table.has_column(&pk.column) {
                tracing::debug!(table = %pk.table, column = %pk.column, "primary key column not in catalog; ignoring");
                continue;
            }

            table.primary_key = Some(pk.column);
        }

        let mut seen = IndexSet::new();

        for fk in foreign_keys {
            catalog.verify_column(&fk.owning(), &fk)?;
            catalog.verify_column(&fk.referenced(), &fk)?;

            if seen.insert(fk.clone()) {
                catalog.foreign_keys.push(fk);
            }
        }

        Ok(catalog)
    }

    fn verify_column(&self, column: &ColumnRef, fk: &ForeignKey) -> Result<()> {
        let Some(table) = self.table_by_name(&column.table) else {
            return Err(Error::invalid_schema(format!(
                "foreign key {fk} references unknown table `{}`",
                column.table
            )));
        };

        if !table.has_column(&column.column) {
            return Err(Error::invalid_schema(format!(
                "foreign key {fk} references unknown column `{}.{}`",
                column.table, column.column
            )));
        }

        Ok(())
    }

    pub fn table(&self, id: impl Into<TableId>) -> &Table {
        &self.tables[id.into().0]
    }

    pub fn table_id(&self, name: &str) -> Option<TableId> {
        self.table_lookup.get(name).copied()
    }

    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.table_id(name).map(|id| self.table(id))
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> {
        self.tables.iter()
    }

    /// Foreign keys held by `table`. Each becomes a to-one field on it.
    pub fn foreign_keys_owned_by<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = &'a ForeignKey> + 'a {
        self.foreign_keys.iter().filter(move |fk| fk.table == table)
    }

    /// Foreign keys pointing at `table`. Each becomes a to-many field on it.
    pub fn foreign_keys_referencing<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = &'a ForeignKey> + 'a {
        self.foreign_keys
            .iter()
            .filter(move |fk| fk.foreign_table == table)
    }

    /// Every `(table, column)` pair a relationship field loads through: both
    /// ends of every foreign key.
    pub fn loader_keys(&self) -> IndexSet<ColumnRef> {
        let mut keys = IndexSet::new();

        for fk in &self.foreign_keys {
            keys.insert(fk.referenced());
            keys.insert(fk.owning());
        }

        keys
    }
}

impl From<&Table> for TableId {
    fn from(value: &Table) -> Self {
        value.id
    }
}
