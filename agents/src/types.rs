//! Agent-specific data types

use std::time::Duration;
use serde::{Deserialize, Serialize};
use shared::Document;

/// One web search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

/// A stored document ranked against a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

/// Tavily search depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDepth::Basic => "basic",
            SearchDepth::Advanced => "advanced",
        }
    }
}

impl std::str::FromStr for SearchDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(SearchDepth::Basic),
            "advanced" => Ok(SearchDepth::Advanced),
            _ => Err(format!("Unknown search depth: {s}")),
        }
    }
}

/// Connection settings for an Ollama server
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub embed_model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "gemma:2b".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            temperature: 0.1,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Connection settings for the Tavily search API
#[derive(Debug, Clone, PartialEq)]
pub struct TavilyConfig {
    pub base_url: String,
    pub api_key: String,
    pub search_depth: SearchDepth,
    pub timeout: Duration,
}

impl TavilyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.tavily.com".to_string(),
            api_key: api_key.into(),
            search_depth: SearchDepth::Basic,
            timeout: Duration::from_secs(30),
        }
    }
}
