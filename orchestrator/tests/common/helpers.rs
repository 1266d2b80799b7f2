//! Test helpers and builder patterns for orchestrator tests
//!
//! Every collaborator is a mockall double. The builder starts from mocks that
//! succeed any number of times; tests swap in a stricter mock where call
//! counts matter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agents::{AgentError, MockPitchGenerator, MockResearchAgent, MockSummarizer, MockVectorStore};
use orchestrator::{Orchestrator, PipelineConfig, ResearchCache};

use super::fixtures::TestFixtures;

pub type TestOrchestrator = Orchestrator<MockResearchAgent, MockSummarizer, MockPitchGenerator, MockVectorStore>;

/// Builder for test orchestrators with sensible defaults
pub struct OrchestratorBuilder {
    config: PipelineConfig,
    research_agent: MockResearchAgent,
    summarizer: MockSummarizer,
    pitch_generator: MockPitchGenerator,
    vector_store: MockVectorStore,
    cache: Option<ResearchCache>,
}

#[allow(dead_code)]
impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            config: TestFixtures::config(),
            research_agent: TestHelpers::research_agent(0..),
            summarizer: TestHelpers::summarizer(),
            pitch_generator: TestHelpers::pitch_generator(),
            vector_store: TestHelpers::vector_store(0..),
            cache: None,
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_research_agent(mut self, research_agent: MockResearchAgent) -> Self {
        self.research_agent = research_agent;
        self
    }

    pub fn with_summarizer(mut self, summarizer: MockSummarizer) -> Self {
        self.summarizer = summarizer;
        self
    }

    pub fn with_pitch_generator(mut self, pitch_generator: MockPitchGenerator) -> Self {
        self.pitch_generator = pitch_generator;
        self
    }

    pub fn with_vector_store(mut self, vector_store: MockVectorStore) -> Self {
        self.vector_store = vector_store;
        self
    }

    pub fn with_cache(mut self, cache: ResearchCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> TestOrchestrator {
        let orchestrator = Orchestrator::new(
            self.config,
            self.research_agent,
            self.summarizer,
            self.pitch_generator,
            self.vector_store,
        );
        match self.cache {
            Some(cache) => orchestrator.with_cache(cache),
            None => orchestrator,
        }
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ready-made collaborator doubles
pub struct TestHelpers;

#[allow(dead_code)]
impl TestHelpers {
    /// Research agent answering with fixture findings
    pub fn research_agent(times: impl Into<mockall::TimesRange>) -> MockResearchAgent {
        let mut agent = MockResearchAgent::new();
        agent
            .expect_research()
            .times(times)
            .returning(|_| Ok(TestFixtures::FINDINGS.to_string()));
        agent
    }

    /// Research agent echoing its query, so each topic has distinct findings
    pub fn echo_research_agent(times: impl Into<mockall::TimesRange>) -> MockResearchAgent {
        let mut agent = MockResearchAgent::new();
        agent
            .expect_research()
            .times(times)
            .returning(|query| Ok(format!("findings for {query}")));
        agent
    }

    /// Research agent that fails the first `failures` calls, then succeeds
    pub fn flaky_research_agent(failures: usize) -> (MockResearchAgent, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut agent = MockResearchAgent::new();
        agent.expect_research().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) < failures {
                Err(AgentError::invalid_response("tavily", "search unavailable"))
            } else {
                Ok(TestFixtures::FINDINGS.to_string())
            }
        });
        (agent, calls)
    }

    /// Research agent whose every call exceeds its deadline
    pub fn timing_out_research_agent(times: impl Into<mockall::TimesRange>) -> MockResearchAgent {
        let mut agent = MockResearchAgent::new();
        agent.expect_research().times(times).returning(|_| {
            Err(AgentError::Timeout {
                service: "tavily".to_string(),
                timeout: Duration::from_secs(30),
            })
        });
        agent
    }

    pub fn summarizer() -> MockSummarizer {
        let mut summarizer = MockSummarizer::new();
        summarizer
            .expect_summarize()
            .returning(|_| Ok(TestFixtures::SUMMARY.to_string()));
        summarizer
    }

    pub fn pitch_generator() -> MockPitchGenerator {
        let mut pitch = MockPitchGenerator::new();
        pitch
            .expect_generate_pitch()
            .returning(|_, _| Ok(TestFixtures::PITCH.to_string()));
        pitch
    }

    pub fn vector_store(times: impl Into<mockall::TimesRange>) -> MockVectorStore {
        let mut store = MockVectorStore::new();
        store
            .expect_add_documents()
            .times(times)
            .returning(|docs| Ok(format!("Stored {} documents in vector database", docs.len())));
        store
    }

    pub fn failing_vector_store() -> MockVectorStore {
        let mut store = MockVectorStore::new();
        store
            .expect_add_documents()
            .times(1)
            .returning(|_| Err(AgentError::invalid_response("embedder", "connection refused")));
        store
    }
}
