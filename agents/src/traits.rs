//! Collaborator trait definitions for dependency injection
//!
//! The low-level traits (`LanguageModel`, `WebSearch`, `Embedder`) wrap hosted
//! services. The capability traits (`ResearchAgent`, `Summarizer`,
//! `PitchGenerator`, `VectorStore`) are what the orchestrator consumes. Every
//! trait carries a mockall mock for tests.

use async_trait::async_trait;
use shared::Document;

use crate::error::AgentResult;
use crate::types::{ScoredDocument, SearchHit};

/// Opaque text completion
#[mockall::automock]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a prompt, returning the model's text
    async fn complete(&self, prompt: &str) -> AgentResult<String>;
}

/// Opaque query to snippets search
#[mockall::automock]
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Search the web, returning at most `max_results` hits
    async fn search(&self, query: &str, max_results: usize) -> AgentResult<Vec<SearchHit>>;
}

/// Text embedding
#[mockall::automock]
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed each text, one vector per input in input order
    async fn embed(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>>;
}

/// Search-and-reason capability used by the research stage
#[mockall::automock]
#[async_trait]
pub trait ResearchAgent: Send + Sync {
    /// Answer a free-text research query with free-text findings
    async fn research(&self, query: &str) -> AgentResult<String>;
}

/// Summarization over research documents
#[mockall::automock]
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, documents: &[Document]) -> AgentResult<String>;
}

/// Pitch outline generation from findings and their summary
#[mockall::automock]
#[async_trait]
pub trait PitchGenerator: Send + Sync {
    async fn generate_pitch(&self, research_data: &str, summary: &str) -> AgentResult<String>;
}

/// Document persistence with similarity lookup
#[mockall::automock]
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store documents, returning a human-readable status
    async fn add_documents(&self, documents: &[Document]) -> AgentResult<String>;

    /// Return up to `k` stored documents ranked by similarity to `query`
    async fn similarity_search(&self, query: &str, k: usize) -> AgentResult<Vec<ScoredDocument>>;
}
