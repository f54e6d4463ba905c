//! Error types for payload decoding and the API clients.
//!
//! # Design
//! Decoding failures split in two: `ParseError` when the text is not JSON at
//! all, `SchemaError` when it is JSON of the wrong shape. Both live under
//! `PayloadError`, which `ApiError` wraps alongside the transport-level
//! outcomes (`NotFound`, `Unauthorized`, unexpected status).

use std::fmt;

use thiserror::Error;

/// The payload text is not syntactically valid JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed JSON at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// The payload is valid JSON but does not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Top-level field that was missing or of the wrong type.
    pub field: Option<String>,
    /// Position of the offending array element.
    pub index: Option<usize>,
    pub message: String,
}

impl SchemaError {
    pub(crate) fn root(message: impl Into<String>) -> Self {
        Self {
            field: None,
            index: None,
            message: message.into(),
        }
    }

    pub(crate) fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            index: None,
            message: message.into(),
        }
    }

    pub(crate) fn element(field: &str, index: usize, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            index: Some(index),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.field, self.index) {
            (Some(field), Some(index)) => {
                write!(f, "schema mismatch at {field}[{index}]: {}", self.message)
            }
            (Some(field), None) => write!(f, "schema mismatch at {field}: {}", self.message),
            (None, _) => write!(f, "schema mismatch: {}", self.message),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Failure to decode a response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors returned by the client `build_*` and `parse_*` methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; no item matched.
    #[error("resource not found")]
    NotFound,

    /// The server returned 401; credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other status the operation did not expect.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("invalid response payload: {0}")]
    Payload(#[from] PayloadError),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required environment variable is unset or empty.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("invalid configuration {name}={value:?}")]
    InvalidConfig { name: &'static str, value: String },
}
