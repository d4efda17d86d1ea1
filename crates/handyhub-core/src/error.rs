//! Error types shared by every layer of the client core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (connection refused, DNS, TLS, timeout).
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    /// Displays as the server-supplied message so callers can show it as-is.
    #[error("{message}")]
    Api { status: Option<u16>, message: String },

    #[error("Invalid response: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for failures caused by the backend being unreachable or rejecting
    /// the request. These are the only errors the session fallback may absorb.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Api { .. })
    }

    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_server_message() {
        let err = Error::Api {
            status: Some(401),
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_backend_failure_classification() {
        assert!(Error::Transport("refused".into()).is_backend_failure());
        assert!(Error::Api { status: Some(500), message: "boom".into() }.is_backend_failure());
        assert!(!Error::Storage("disk full".into()).is_backend_failure());
        assert!(!Error::MalformedResponse("not json".into()).is_backend_failure());
        assert!(!Error::InvalidInput("email".into()).is_backend_failure());
    }
}
