//! Error types for the Assistant MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur while serving a tool call against the backing store.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// No bearer token was supplied with the request
    #[error("No authentication token provided in request header.")]
    Authentication,

    /// Base or table identifier is missing from configuration
    #[error("{0}")]
    Configuration(String),

    /// Backing store answered with a non-success status
    #[error("Request failed with status {status}")]
    Request { status: u16, detail: Value },

    /// Network-level failure (DNS, timeout, connection reset)
    #[error("Request failed: {0}")]
    Transport(String),

    /// A write was requested without any field to change
    #[error("No fields provided to update.{}", hint_suffix(.0))]
    NoFieldsProvided(Option<String>),

    /// A parameter failed validation before any request was made
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_deref()
        .map(|h| format!(" {}", h))
        .unwrap_or_default()
}

impl AssistantError {
    /// The uniform `{"error": ...}` object returned to tool callers.
    ///
    /// Request errors also carry the HTTP status and the backing store's
    /// error detail.
    pub fn payload(&self) -> Value {
        match self {
            AssistantError::Request { status, detail } => json!({
                "error": self.to_string(),
                "status": status,
                "detail": detail,
            }),
            _ => json!({ "error": self.to_string() }),
        }
    }

    /// HTTP status carried by a request error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AssistantError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ValidationError> for AssistantError {
    fn from(err: ValidationError) -> Self {
        AssistantError::InvalidParameter(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with AssistantError
pub type AssistantResult<T> = Result<T, AssistantError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
