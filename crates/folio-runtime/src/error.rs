use std::fmt;

/// Result type for folio-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the view runtime
#[derive(Debug)]
pub enum Error {
    /// Index layer error while building a view
    Index(folio_index::Error),

    /// Resource fetch failed while building a view
    Fetch(folio_fetch::Error),

    /// A required content item does not exist (e.g. unknown post id)
    NotFound(String),

    /// Navigation target is not in the view registry
    UnknownView(String),

    /// Direct activation of a secret view without internal access
    SecretView(String),

    /// View construction failed for another reason
    Build(String),

    /// Session store could not be read or written
    Session(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "Index error: {}", err),
            Error::Fetch(err) => write!(f, "Fetch error: {}", err),
            Error::NotFound(what) => write!(f, "Not found: {}", what),
            Error::UnknownView(view) => write!(f, "Unknown view: \"{}\"", view),
            Error::SecretView(view) => {
                write!(f, "Invalid access to secret view: \"{}\"", view)
            }
            Error::Build(msg) => write!(f, "View build failed: {}", msg),
            Error::Session(msg) => write!(f, "Session error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            Error::Fetch(err) => Some(err),
            Error::NotFound(_)
            | Error::UnknownView(_)
            | Error::SecretView(_)
            | Error::Build(_)
            | Error::Session(_) => None,
        }
    }
}

impl From<folio_index::Error> for Error {
    fn from(err: folio_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<folio_fetch::Error> for Error {
    fn from(err: folio_fetch::Error) -> Self {
        Error::Fetch(err)
    }
}
