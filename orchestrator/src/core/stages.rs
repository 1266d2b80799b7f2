//! The pipeline stages and their fallback values
//!
//! Every stage is total: collaborator errors are logged and replaced by a
//! fixed fallback so a run always produces a complete state.

use std::fmt;

use agents::core::prompt::research_query;
use agents::{PitchGenerator, ResearchAgent, Summarizer, VectorStore};
use shared::{logging, stage_debug, stage_warn, Document, PipelineState, Stage, StateUpdate};

use super::cache::ResearchCache;

pub const NO_DOCUMENTS_TO_SUMMARIZE: &str = "No documents to summarize";
pub const NO_DOCUMENTS_TO_STORE: &str = "No documents to store";
pub const VECTOR_STORAGE_SKIPPED: &str = "Vector storage skipped (disabled by configuration)";
pub const VECTOR_STORAGE_BACKGROUND: &str = "Vector storage completed in background";

pub const FALLBACK_SUMMARY: &str =
    "Summary unavailable: the research findings could not be summarized. Review the research data directly.";

pub const FALLBACK_PITCH: &str = "Pitch outline unavailable.\n\
1. Problem: describe the customer pain point.\n\
2. Solution: describe the product.\n\
3. Market: size and growth of the target segment.\n\
4. Competition: key alternatives and differentiation.\n\
5. Ask: funding required and planned use.";

/// Research text used when the research agent fails for `topic`
pub fn fallback_research_data(topic: &str) -> String {
    format!(
        "Research unavailable for '{topic}'. Live market data could not be retrieved; \
         treat any analysis of {topic} as general guidance."
    )
}

/// One step of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Research,
    Processing,
    Vectorize,
}

impl PipelineStage {
    pub const ORDER: [PipelineStage; 3] = [
        PipelineStage::Research,
        PipelineStage::Processing,
        PipelineStage::Vectorize,
    ];

    pub fn name(&self) -> &'static str {
        self.log_stage().as_str()
    }

    pub fn log_stage(&self) -> Stage {
        match self {
            PipelineStage::Research => Stage::Research,
            PipelineStage::Processing => Stage::Processing,
            PipelineStage::Vectorize => Stage::Vectorize,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub async fn research_step<R: ResearchAgent>(agent: &R, cache: &ResearchCache, topic: &str) -> StateUpdate {
    if let Some(cached) = cache.get(topic).await {
        stage_debug!(Stage::Research, "💾 Cache hit for '{}'", topic);
        return cached;
    }
    stage_debug!(Stage::Research, "🔍 Cache miss for '{}'", topic);

    match agent.research(&research_query(topic)).await {
        Ok(findings) => {
            let document = Document::research(findings.clone(), topic);
            let update = StateUpdate::research(findings, vec![document]);
            cache.put(topic, update.clone()).await;
            update
        }
        Err(e) => {
            stage_warn!(Stage::Research, "⚠️ Research failed for '{}', using fallback: {}", topic, e);
            let findings = fallback_research_data(topic);
            let document = Document::fallback(findings.clone(), topic);
            StateUpdate::research(findings, vec![document])
        }
    }
}

pub async fn processing_step<S, P>(summarizer: &S, pitch_generator: &P, state: &PipelineState) -> StateUpdate
where
    S: Summarizer,
    P: PitchGenerator,
{
    let documents = state.documents();

    let summary = if documents.is_empty() {
        Ok(NO_DOCUMENTS_TO_SUMMARIZE.to_string())
    } else {
        summarizer.summarize(documents).await
    };

    let result = match summary {
        Ok(summary) => pitch_generator
            .generate_pitch(state.research_data(), &summary)
            .await
            .map(|pitch| (summary, pitch)),
        Err(e) => Err(e),
    };

    match result {
        Ok((summary, pitch)) => StateUpdate::processing(summary, pitch),
        Err(e) => {
            logging::log_error(Stage::Processing, "Processing (using fallback)", &e);
            StateUpdate::processing(FALLBACK_SUMMARY, FALLBACK_PITCH)
        }
    }
}

pub async fn vectorize_step<V: VectorStore>(store: &V, skip_storage: bool, state: &PipelineState) -> StateUpdate {
    if skip_storage {
        stage_debug!(Stage::Vectorize, "⏭️ Vector storage disabled");
        return StateUpdate::vector_status(VECTOR_STORAGE_SKIPPED);
    }

    let documents = state.documents();
    if documents.is_empty() {
        return StateUpdate::vector_status(NO_DOCUMENTS_TO_STORE);
    }

    match store.add_documents(documents).await {
        Ok(status) => StateUpdate::vector_status(status),
        Err(e) => {
            stage_warn!(Stage::Vectorize, "⚠️ Vector storage failed: {}", e);
            StateUpdate::vector_status(VECTOR_STORAGE_BACKGROUND)
        }
    }
}
