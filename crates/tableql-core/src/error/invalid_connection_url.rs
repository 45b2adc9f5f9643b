use super::Error;

/// Error when a database URL cannot be turned into connection settings.
///
/// Raised before any connection attempt: the URL does not parse, uses a
/// scheme other than `postgres`/`postgresql`, or lacks a host or database
/// name.
#[derive(Debug)]
pub(super) struct InvalidConnectionUrl {
    reason: Box<str>,
}

impl std::error::Error for InvalidConnectionUrl {}

impl core::fmt::Display for InvalidConnectionUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid connection URL: {}", self.reason)
    }
}

impl Error {
    pub fn invalid_connection_url(reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConnectionUrl(InvalidConnectionUrl {
            reason: reason.into().into(),
        }))
    }

    pub fn is_invalid_connection_url(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConnectionUrl(_))
    }
}
