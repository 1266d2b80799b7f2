//! Agent error types

use std::time::Duration;
use thiserror::Error;

/// Result type for collaborator operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Failures raised by language-model, search and vector-store collaborators
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Network error calling {service}: {message}")]
    NetworkError { service: String, message: String },

    #[error("{service} request timed out after {timeout:?}")]
    Timeout { service: String, timeout: Duration },

    #[error("{service} returned HTTP {status}: {message}")]
    ApiError { service: String, status: u16, message: String },

    #[error("Invalid response from {service}: {message}")]
    InvalidResponse { service: String, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AgentError {
    pub fn invalid_response(service: &str, message: impl Into<String>) -> Self {
        AgentError::InvalidResponse {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        AgentError::InvalidInput { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AgentError::ConfigError { message: message.into() }
    }

    /// Map a transport error, separating client timeouts from other failures
    pub fn from_reqwest(service: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AgentError::Timeout {
                service: service.to_string(),
                timeout,
            }
        } else {
            AgentError::NetworkError {
                service: service.to_string(),
                message: err.to_string(),
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AgentError::Timeout { .. })
    }
}
