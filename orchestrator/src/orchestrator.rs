//! Main orchestrator implementation
//!
//! Runs the research, processing and vectorize stages over an accumulating
//! [`PipelineState`], with collaborators injected as generic parameters.

use shared::{logging, stage_debug, stage_info, PipelineState, Stage, StateUpdate};

use crate::config::PipelineConfig;
use crate::core::{processing_step, research_step, vectorize_step, PipelineStage, ResearchCache};
use crate::traits::{PitchGenerator, ResearchAgent, Summarizer, VectorStore};

/// Pipeline runner owning its research cache
pub struct Orchestrator<R, S, P, V>
where
    R: ResearchAgent,
    S: Summarizer,
    P: PitchGenerator,
    V: VectorStore,
{
    config: PipelineConfig,
    cache: ResearchCache,

    /// Injected collaborators
    research_agent: R,
    summarizer: S,
    pitch_generator: P,
    vector_store: V,
}

impl<R, S, P, V> Orchestrator<R, S, P, V>
where
    R: ResearchAgent,
    S: Summarizer,
    P: PitchGenerator,
    V: VectorStore,
{
    /// Create a new orchestrator with a cache sized from `config`
    pub fn new(config: PipelineConfig, research_agent: R, summarizer: S, pitch_generator: P, vector_store: V) -> Self {
        let cache = ResearchCache::new(config.enable_caching, config.cache_size_limit);
        Self {
            config,
            cache,
            research_agent,
            summarizer,
            pitch_generator,
            vector_store,
        }
    }

    /// Replace the research cache, e.g. with one using a custom clock
    pub fn with_cache(mut self, cache: ResearchCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResearchCache {
        &self.cache
    }

    pub fn vector_store(&self) -> &V {
        &self.vector_store
    }

    /// Run every stage for `topic` and return the final state
    ///
    /// Never fails: stage errors are replaced by fallback values.
    pub async fn invoke(&self, topic: &str) -> PipelineState {
        logging::log_startup(Stage::Orchestrator, &format!("pipeline for '{topic}'"));

        let mut state = PipelineState::new();
        let mut stages = PipelineStage::ORDER.into_iter().peekable();

        while let Some(stage) = stages.next() {
            let fan_out = self.config.enable_parallel_processing
                && stage == PipelineStage::Processing
                && stages.peek() == Some(&PipelineStage::Vectorize);

            if fan_out {
                stages.next();
                stage_debug!(Stage::Orchestrator, "🔀 Running processing and vectorize together");
                let (processed, stored) = tokio::join!(
                    self.run_stage(PipelineStage::Processing, topic, &state),
                    self.run_stage(PipelineStage::Vectorize, topic, &state)
                );
                Self::apply(&mut state, PipelineStage::Processing, processed);
                Self::apply(&mut state, PipelineStage::Vectorize, stored);
            } else {
                let update = self.run_stage(stage, topic, &state).await;
                Self::apply(&mut state, stage, update);
            }
        }

        logging::log_success(Stage::Orchestrator, &format!("pipeline for '{topic}' complete"));
        state
    }

    async fn run_stage(&self, stage: PipelineStage, topic: &str, state: &PipelineState) -> StateUpdate {
        logging::log_progress(stage.log_stage(), "Running stage", &format!("{stage} for '{topic}'"));
        match stage {
            PipelineStage::Research => research_step(&self.research_agent, &self.cache, topic).await,
            PipelineStage::Processing => processing_step(&self.summarizer, &self.pitch_generator, state).await,
            PipelineStage::Vectorize => {
                vectorize_step(&self.vector_store, self.config.vector_storage_skipped(), state).await
            }
        }
    }

    fn apply(state: &mut PipelineState, stage: PipelineStage, update: StateUpdate) {
        let keys: Vec<&str> = update.keys().iter().map(|key| key.as_str()).collect();
        stage_info!(stage.log_stage(), "✅ Stage {} wrote [{}]", stage, keys.join(", "));
        state.merge(update);
    }
}
