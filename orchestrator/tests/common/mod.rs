//! Common test utilities and infrastructure
//!
//! Shared fixtures and the orchestrator builder used across the pipeline
//! test suites.

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
#[allow(unused_imports)]
pub use fixtures::TestFixtures;
#[allow(unused_imports)]
pub use helpers::{OrchestratorBuilder, TestHelpers, TestOrchestrator};
