//! Test fixtures and data for orchestrator tests

use orchestrator::PipelineConfig;

/// Standard test data and fixtures
pub struct TestFixtures;

#[allow(dead_code)]
impl TestFixtures {
    pub const FITNESS_TOPIC: &'static str = "AI fitness app";
    pub const WIDGET_TOPIC: &'static str = "widget co";

    pub const FINDINGS: &'static str =
        "Competitors: Fitbod, Freeletics. Trend: personalised coaching. Audience: busy professionals.";
    pub const SUMMARY: &'static str = "Crowded but growing market for adaptive workout planning.";
    pub const PITCH: &'static str = "1. Problem: generic plans\n2. Solution: adaptive AI coach\n3. Ask: $1.5M seed";
    pub const STORED: &'static str = "Stored 1 documents in vector database";

    /// Defaults with sequential stages, caching on and storage enabled
    pub fn config() -> PipelineConfig {
        PipelineConfig {
            enable_parallel_processing: false,
            ..PipelineConfig::default()
        }
    }

    pub fn parallel_config() -> PipelineConfig {
        PipelineConfig {
            enable_parallel_processing: true,
            ..PipelineConfig::default()
        }
    }

    pub fn topics(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("startup idea {i}")).collect()
    }
}
