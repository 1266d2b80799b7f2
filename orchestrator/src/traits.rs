//! Trait definitions with mockall annotations for testing
//!
//! The pipeline collaborators are defined in the `agents` crate and re-exported
//! here so callers can wire an `Orchestrator` from one import. Session
//! persistence is owned by the orchestrator.

use shared::{PipelineState, SessionRecord, SessionSummary};

use crate::error::OrchestratorResult;

pub use agents::{PitchGenerator, ResearchAgent, Summarizer, VectorStore};

/// Persistence of pipeline runs as chat sessions
#[mockall::automock]
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session holding one user/assistant exchange, returning its id
    async fn create_session(&self, title: &str, user_prompt: &str, result: &PipelineState) -> OrchestratorResult<String>;

    /// Append a turn to an existing session
    ///
    /// The stored result is replaced only when `result` is given. Unknown ids
    /// are ignored.
    async fn update_session(
        &self,
        id: &str,
        user_prompt: Option<String>,
        result: Option<PipelineState>,
    ) -> OrchestratorResult<()>;

    async fn get_session(&self, id: &str) -> OrchestratorResult<Option<SessionRecord>>;

    /// All sessions, most recently updated first
    async fn list_sessions(&self) -> OrchestratorResult<Vec<SessionSummary>>;
}
