use super::Error;

/// Error when a column's database type has no API scalar.
///
/// Building a schema with such a column would produce a field without a
/// queryable type, so the whole build is rejected instead.
#[derive(Debug)]
pub(super) struct UnmappedType {
    table: Box<str>,
    column: Box<str>,
    data_type: Box<str>,
}

impl std::error::Error for UnmappedType {}

impl core::fmt::Display for UnmappedType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unmapped column type: {}.{} has type `{}`",
            self.table, self.column, self.data_type
        )
    }
}

impl Error {
    /// Creates an unmapped type error for `table.column`.
    pub fn unmapped_type(
        table: impl Into<String>,
        column: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnmappedType(UnmappedType {
            table: table.into().into(),
            column: column.into().into(),
            data_type: data_type.into().into(),
        }))
    }

    /// Returns `true` if this error is an unmapped type error.
    pub fn is_unmapped_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnmappedType(_))
    }
}
