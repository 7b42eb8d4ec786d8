/*!
 * Error types for the nmt-worker application.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Request errors are recoverable and become error responses. Engine errors are
 * fatal for the request and propagate to the transport layer.
 */

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Per-field validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    messages: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    /// Create an empty error collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error with a single message for one field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut error = Self::new();
        error.add(field, message);
        error
    }

    /// Record a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages.entry(field.into()).or_default().push(message.into());
    }

    /// Whether no messages were recorded
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages recorded for a field
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.messages.get(field).map(Vec::as_slice)
    }

    /// Field names that failed validation, in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// JSON object of the form `{"field": ["message", ...]}`
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self.messages.iter()
            .map(|(field, messages)| {
                let list = messages.iter().cloned().map(Value::String).collect();
                (field.clone(), Value::Array(list))
            })
            .collect();
        Value::Object(map)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.messages.iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Recoverable request errors, each mapped to an HTTP status
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// One or more request fields are invalid
    #[error("Invalid request: {0}")]
    InvalidField(ValidationError),

    /// Request content exceeds the configured character limit
    #[error("Request is too large ({length} characters). Maximum request size is {limit} characters.")]
    PayloadTooLarge {
        /// Observed character count
        length: usize,
        /// Configured maximum
        limit: usize,
    },
}

impl RequestError {
    /// HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidField(_) => 400,
            Self::PayloadTooLarge { .. } => 413,
        }
    }

    /// Response content for this error
    pub fn content(&self) -> Value {
        match self {
            Self::InvalidField(messages) => messages.to_json(),
            Self::PayloadTooLarge { .. } => Value::String(self.to_string()),
        }
    }
}

impl From<ValidationError> for RequestError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidField(error)
    }
}

/// Errors that can occur when calling the translation engine or QE model
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error when sending a request to a model server fails
    #[error("Engine request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing a model server response fails
    #[error("Failed to parse engine response: {0}")]
    ParseError(String),

    /// Error returned by the model server itself
    #[error("Engine responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the server
        message: String,
    },

    /// The engine returned a different number of items than it was given
    #[error("Engine returned {actual} items for {expected} inputs")]
    MisalignedOutput {
        /// Number of inputs sent
        expected: usize,
        /// Number of outputs received
        actual: usize,
    },
}

/// Fatal pipeline errors, not turned into responses
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Error from the translation engine or QE model
    #[error("Engine failure: {0}")]
    Engine(#[from] EngineError),

    /// Request factors could not be resolved against the engine configuration
    #[error("Factor resolution failed: {0}")]
    Factors(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the pipeline
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
