use http::StatusCode;
use serde_json::Value;
use std::fmt;
use thiserror::Error as ThisError;

/// The error type for paylink operations.
#[derive(ThisError, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    info: Option<Value>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configured auth token is malformed (bad hex, out-of-range scalar).
    CredentialInvalid,

    /// Request cannot be built or dispatched (invalid URI, header, etc.).
    RequestInvalid,

    /// Network-level failure: DNS, connection refused, timeout.
    Transport,

    /// The API answered with an HTTP error status.
    Api,

    /// Unexpected errors (malformed response body, I/O, etc.).
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            info: None,
            source: None,
        }
    }

    /// Add a source error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message extracted from the API error body, or the constructed message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, present for [`ErrorKind::Api`] errors.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Auxiliary `info` value from the API error body, if any.
    pub fn info(&self) -> Option<&Value> {
        self.info.as_ref()
    }

    /// Check if this error came back from the API as an HTTP error status.
    pub fn is_api_error(&self) -> bool {
        self.kind == ErrorKind::Api
    }
}

// Convenience constructors
impl Error {
    /// Create a credential invalid error.
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a request invalid error.
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create an API error from a decoded error body.
    ///
    /// `message` and `info` come from the `message` and `info` fields of the
    /// response body; either may be absent.
    pub fn api(status: StatusCode, message: Option<String>, info: Option<Value>) -> Self {
        Self {
            kind: ErrorKind::Api,
            message: message.unwrap_or_else(|| format!("API request failed with {status}")),
            status: Some(status),
            info,
            source: None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Transport => write!(f, "transport failure"),
            ErrorKind::Api => write!(f, "api error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Self::credential_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
