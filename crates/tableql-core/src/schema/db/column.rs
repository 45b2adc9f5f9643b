/// One row of the column catalog, as read from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub table: String,
    pub column: String,
    pub data_type: String,
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Column {
    /// Name of the column
    pub name: String,

    /// Database type name, as reported by the catalog (`integer`, `text`, ...)
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        data_type: impl Into<String>,
    ) -> ColumnInfo {
        ColumnInfo {
            table: table.into(),
            column: column.into(),
            data_type: data_type.into(),
        }
    }
}
