//! Core pipeline logic: the research cache and the staged workflow

pub mod cache;
pub mod stages;

pub use cache::{cache_key, normalize_topic, InsertionClock, ResearchCache, SequenceClock};
pub use stages::{
    fallback_research_data, processing_step, research_step, vectorize_step, PipelineStage, FALLBACK_PITCH,
    FALLBACK_SUMMARY, NO_DOCUMENTS_TO_STORE, NO_DOCUMENTS_TO_SUMMARIZE, VECTOR_STORAGE_BACKGROUND,
    VECTOR_STORAGE_SKIPPED,
};
