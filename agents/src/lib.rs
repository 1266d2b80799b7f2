//! Collaborator library for the startup intelligence pipeline
//!
//! This library provides the capabilities the orchestrator delegates to:
//! web research, summarization, pitch generation and vector storage, backed
//! by an Ollama language model and the Tavily search API.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{AgentError, AgentResult};
pub use traits::*;
pub use types::*;
pub use crate::core::{LlmPitchGenerator, LlmSummarizer, SearchResearchAgent};
pub use services::{LocalVectorStore, OllamaClient, TavilyClient};
