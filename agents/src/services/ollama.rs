//! Ollama client for text completion and embeddings

use async_trait::async_trait;
use serde_json::Value;
use shared::{stage_debug, Stage};

use crate::core::text::coerce_text;
use crate::error::{AgentError, AgentResult};
use crate::traits::{Embedder, LanguageModel};
use crate::types::OllamaConfig;

const SERVICE: &str = "ollama";

/// HTTP client for a local or remote Ollama server
#[derive(Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    config: OllamaConfig,
    /// Stage completions are logged under
    stage: Stage,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> AgentResult<Self> {
        if config.model.trim().is_empty() {
            return Err(AgentError::config("missing Ollama model name"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::config(format!("failed to build Ollama HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            stage: Stage::Orchestrator,
        })
    }

    /// Attribute this client's completion logs to `stage`
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// POST a JSON body and return the decoded JSON response
    async fn post_json(&self, path: &str, body: &Value) -> AgentResult<Value> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest(SERVICE, self.config.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AgentError::ApiError {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AgentError::invalid_response(SERVICE, format!("failed to parse response: {e}")))
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn complete(&self, prompt: &str) -> AgentResult<String> {
        let request_start = std::time::Instant::now();
        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": self.config.temperature
            }
        });

        let response_json = self.post_json("api/generate", &body).await?;
        let content = response_json
            .get("response")
            .map(coerce_text)
            .ok_or_else(|| AgentError::invalid_response(SERVICE, "no response field"))?;

        stage_debug!(
            self.stage,
            "🤖 {} completed in {:?} ({} chars)",
            self.config.model,
            request_start.elapsed(),
            content.len()
        );
        Ok(content)
    }
}

#[async_trait]
impl Embedder for OllamaClient {
    async fn embed(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::json!({
            "model": self.config.embed_model,
            "input": texts,
        });

        let response_json = self.post_json("api/embed", &body).await?;
        let embeddings: Vec<Vec<f32>> = response_json
            .get("embeddings")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .ok_or_else(|| AgentError::invalid_response(SERVICE, "no embeddings field"))?;

        if embeddings.len() != texts.len() {
            return Err(AgentError::invalid_response(
                SERVICE,
                format!("expected {} embeddings, got {}", texts.len(), embeddings.len()),
            ));
        }

        Ok(embeddings)
    }
}
