/// One row of the primary key catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyInfo {
    pub table: String,
    pub column: String,
}

impl PrimaryKeyInfo {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> PrimaryKeyInfo {
        PrimaryKeyInfo {
            table: table.into(),
            column: column.into(),
        }
    }
}
