//! Search-and-reason research agent

use async_trait::async_trait;
use shared::{stage_debug, Stage};

use crate::core::prompt;
use crate::error::{AgentError, AgentResult};
use crate::traits::{LanguageModel, ResearchAgent, WebSearch};

/// Runs one web search and has the language model reason over the hits
pub struct SearchResearchAgent<S, L>
where
    S: WebSearch,
    L: LanguageModel,
{
    search: S,
    llm: L,
    max_results: usize,
}

impl<S, L> SearchResearchAgent<S, L>
where
    S: WebSearch,
    L: LanguageModel,
{
    pub fn new(search: S, llm: L, max_results: usize) -> Self {
        Self {
            search,
            llm,
            max_results: max_results.max(1),
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }
}

#[async_trait]
impl<S, L> ResearchAgent for SearchResearchAgent<S, L>
where
    S: WebSearch,
    L: LanguageModel,
{
    async fn research(&self, query: &str) -> AgentResult<String> {
        if query.trim().is_empty() {
            return Err(AgentError::invalid_input("research query is empty"));
        }

        let mut hits = self.search.search(query, self.max_results).await?;
        hits.truncate(self.max_results);
        stage_debug!(Stage::Research, "🔎 {} search hits for '{}'", hits.len(), query);

        let findings = self.llm.complete(&prompt::research_prompt(query, &hits)).await?;
        Ok(findings.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockLanguageModel, MockWebSearch};
    use crate::types::SearchHit;

    fn hits(n: usize) -> Vec<SearchHit> {
        (0..n)
            .map(|i| SearchHit {
                title: format!("Result {i}"),
                url: format!("https://example.com/{i}"),
                content: format!("snippet {i}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_research_passes_limit_and_observations() {
        let mut search = MockWebSearch::new();
        search
            .expect_search()
            .withf(|query, max| query == "fitness" && *max == 2)
            .times(1)
            .returning(|_, _| Ok(hits(3)));

        let mut llm = MockLanguageModel::new();
        llm.expect_complete()
            .withf(|prompt| prompt.contains("[2] Result 1") && !prompt.contains("[3]"))
            .times(1)
            .returning(|_| Ok("  findings \n".to_string()));

        let agent = SearchResearchAgent::new(search, llm, 2);
        assert_eq!(agent.research("fitness").await.unwrap(), "findings");
    }

    #[tokio::test]
    async fn test_no_search_results_still_asks_model() {
        let mut search = MockWebSearch::new();
        search.expect_search().times(1).returning(|_, _| Ok(vec![]));

        let mut llm = MockLanguageModel::new();
        llm.expect_complete()
            .withf(|prompt| prompt.contains("No search results were found.") && !prompt.contains("[1]"))
            .times(1)
            .returning(|_| Ok("Little public data on underwater widgets.".to_string()));

        let agent = SearchResearchAgent::new(search, llm, 3);
        assert_eq!(
            agent.research("underwater widgets").await.unwrap(),
            "Little public data on underwater widgets."
        );
    }

    #[tokio::test]
    async fn test_search_failure_propagates_without_llm_call() {
        let mut search = MockWebSearch::new();
        search.expect_search().returning(|_, _| {
            Err(AgentError::NetworkError {
                service: "tavily".to_string(),
                message: "down".to_string(),
            })
        });
        let mut llm = MockLanguageModel::new();
        llm.expect_complete().times(0);

        let agent = SearchResearchAgent::new(search, llm, 3);
        assert!(agent.research("fitness").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let agent = SearchResearchAgent::new(MockWebSearch::new(), MockLanguageModel::new(), 0);
        assert_eq!(agent.max_results(), 1);
        assert!(matches!(
            agent.research("   ").await,
            Err(AgentError::InvalidInput { .. })
        ));
    }
}
