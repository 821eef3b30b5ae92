use std::fmt;

/// Result type for folio-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fetching resources
#[derive(Debug)]
pub enum Error {
    /// Transport-level failure (connection, DNS, timeout)
    Http(reqwest::Error),

    /// The server answered with a non-success status
    Status { status: u16, url: String },

    /// The response body did not decode as the declared type
    Decode(serde_json::Error),

    /// The resource path or root URL is unusable
    InvalidUrl(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(err) => write!(f, "HTTP error: {}", err),
            Error::Status { status, url } => {
                write!(f, "Request failed with status {}: {}", status, url)
            }
            Error::Decode(err) => write!(f, "Decode error: {}", err),
            Error::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            Error::Decode(err) => Some(err),
            Error::Status { .. } | Error::InvalidUrl(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}
