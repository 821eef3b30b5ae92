use std::fmt;

/// Result type for folio-index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the index layer
#[derive(Debug)]
pub enum Error {
    /// Fetching the backing resource failed
    Fetch(folio_fetch::Error),

    /// The fetched document did not match the index schema
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fetch(err) => write!(f, "Fetch error: {}", err),
            Error::Decode(err) => write!(f, "Decode error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fetch(err) => Some(err),
            Error::Decode(err) => Some(err),
        }
    }
}

impl From<folio_fetch::Error> for Error {
    fn from(err: folio_fetch::Error) -> Self {
        Error::Fetch(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}
