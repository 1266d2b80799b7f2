//! Tavily web search client

use async_trait::async_trait;
use serde::Deserialize;
use shared::{stage_debug, Stage};

use crate::error::{AgentError, AgentResult};
use crate::traits::WebSearch;
use crate::types::{SearchHit, TavilyConfig};

const SERVICE: &str = "tavily";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// HTTP client for the Tavily search API
#[derive(Clone)]
pub struct TavilyClient {
    client: reqwest::Client,
    config: TavilyConfig,
}

impl TavilyClient {
    pub fn new(config: TavilyConfig) -> AgentResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AgentError::config("missing Tavily API key"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::config(format!("failed to build Tavily HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> AgentResult<Vec<SearchHit>> {
        let body = serde_json::json!({
            "api_key": self.config.api_key,
            "query": query,
            "max_results": max_results,
            "search_depth": self.config.search_depth.as_str(),
        });

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest(SERVICE, self.config.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::ApiError {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| AgentError::invalid_response(SERVICE, format!("failed to parse response: {e}")))?;

        let mut results = parsed.results;
        results.truncate(max_results);
        stage_debug!(Stage::Research, "🌐 Tavily returned {} results", results.len());
        Ok(results)
    }
}
