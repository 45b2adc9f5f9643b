use super::Error;

/// Error when a pending load never receives its result.
///
/// The batch a key was queued in was dropped before it dispatched, usually
/// because the future that owned the dispatch was cancelled.
#[derive(Debug)]
pub(super) struct LoadCancelled {
    table: Box<str>,
    column: Box<str>,
}

impl std::error::Error for LoadCancelled {}

impl core::fmt::Display for LoadCancelled {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "load cancelled: batch for {}-{} was dropped before it completed",
            self.table, self.column
        )
    }
}

impl Error {
    pub fn load_cancelled(table: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::LoadCancelled(LoadCancelled {
            table: table.into().into(),
            column: column.into().into(),
        }))
    }

    pub fn is_load_cancelled(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::LoadCancelled(_))
    }
}
