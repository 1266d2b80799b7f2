//! Agent core logic: prompts, text coercion and the LLM-backed capabilities

pub mod pitch;
pub mod prompt;
pub mod research;
pub mod summarizer;
pub mod text;

pub use pitch::LlmPitchGenerator;
pub use research::SearchResearchAgent;
pub use summarizer::LlmSummarizer;
pub use text::{coerce_text, cosine_similarity};
