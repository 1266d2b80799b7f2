//! Language-model backed pitch generator

use async_trait::async_trait;

use crate::core::prompt;
use crate::error::AgentResult;
use crate::traits::{LanguageModel, PitchGenerator};

pub struct LlmPitchGenerator<L: LanguageModel> {
    llm: L,
}

impl<L: LanguageModel> LlmPitchGenerator<L> {
    pub fn new(llm: L) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl<L: LanguageModel> PitchGenerator for LlmPitchGenerator<L> {
    async fn generate_pitch(&self, research_data: &str, summary: &str) -> AgentResult<String> {
        let pitch = self.llm.complete(&prompt::pitch_prompt(research_data, summary)).await?;
        Ok(pitch.trim().to_string())
    }
}
