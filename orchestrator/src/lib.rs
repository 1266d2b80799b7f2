//! Orchestrator library for the startup intelligence pipeline
//!
//! Provides the configuration layer, the research cache, the staged pipeline
//! that turns a startup idea into findings, a summary and a pitch outline, and
//! chat session persistence for finished runs.

pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{InsertionClock, PipelineStage, ResearchCache, SequenceClock};
pub use config::PipelineConfig;
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::Orchestrator;
pub use services::FileSessionStore;
pub use traits::{PitchGenerator, ResearchAgent, SessionStore, Summarizer, VectorStore};
