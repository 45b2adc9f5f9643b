use super::Error;

/// Error when a relationship field asks for a loader the request's registry
/// does not hold.
///
/// The registry is built from the same foreign keys as the relationship
/// fields, so this indicates an internal inconsistency rather than bad input.
#[derive(Debug)]
pub(super) struct MissingLoader {
    key: Box<str>,
}

impl std::error::Error for MissingLoader {}

impl core::fmt::Display for MissingLoader {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no loader registered for `{}`", self.key)
    }
}

impl Error {
    /// Creates a missing loader error for the given `<table>-<column>` key.
    pub fn missing_loader(key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingLoader(MissingLoader {
            key: key.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing loader error.
    pub fn is_missing_loader(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingLoader(_))
    }
}
