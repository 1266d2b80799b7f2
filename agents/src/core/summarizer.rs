//! Language-model backed summarizer

use async_trait::async_trait;
use shared::Document;

use crate::core::prompt;
use crate::error::{AgentError, AgentResult};
use crate::traits::{LanguageModel, Summarizer};

/// Summarizes every document in a single prompt
pub struct LlmSummarizer<L: LanguageModel> {
    llm: L,
}

impl<L: LanguageModel> LlmSummarizer<L> {
    pub fn new(llm: L) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl<L: LanguageModel> Summarizer for LlmSummarizer<L> {
    async fn summarize(&self, documents: &[Document]) -> AgentResult<String> {
        if documents.is_empty() {
            return Err(AgentError::invalid_input("no documents to summarize"));
        }

        let summary = self.llm.complete(&prompt::summary_prompt(documents)).await?;
        Ok(summary.trim().to_string())
    }
}
