//! Orchestrator-specific error types
//!
//! Pipeline stages never return these: collaborator failures inside a run are
//! replaced with fallback values. They surface from configuration, wiring and
//! session persistence, before or after a run.

use agents::AgentError;
use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Missing required API key: {key}")]
    MissingApiKey { key: String },

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Session store error: {message}")]
    SessionError { message: String },

    #[error("Collaborator error: {0}")]
    AgentError(#[from] AgentError),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OrchestratorError {
    pub fn config(field: impl Into<String>) -> Self {
        OrchestratorError::ConfigurationError { field: field.into() }
    }

    pub fn session(message: impl Into<String>) -> Self {
        OrchestratorError::SessionError { message: message.into() }
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
