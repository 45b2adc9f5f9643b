use super::ColumnRef;

/// A foreign key edge.
///
/// The owning table (`table`) holds the key in `column`; it points at
/// `foreign_column` of the referenced table (`foreign_table`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
    pub foreign_table: String,
    pub foreign_column: String,
}

impl ForeignKey {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> ForeignKey {
        ForeignKey {
            table: table.into(),
            column: column.into(),
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
        }
    }

    /// The side holding the key value.
    pub fn owning(&self) -> ColumnRef {
        ColumnRef::new(&self.table, &self.column)
    }

    /// The side the key points at.
    pub fn referenced(&self) -> ColumnRef {
        ColumnRef::new(&self.foreign_table, &self.foreign_column)
    }

    pub fn is_self_referencing(&self) -> bool {
        self.table == self.foreign_table
    }
}

impl core::fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.table, self.column, self.foreign_table, self.foreign_column
        )
    }
}
