//! Pipeline configuration loaded from the environment
//!
//! Values come from process environment variables, after a `.env` file in the
//! current or a parent directory has been loaded. Quick mode overrides a fixed
//! set of options for a faster, lighter run.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use agents::{OllamaConfig, SearchDepth, TavilyConfig};

use crate::error::{OrchestratorError, OrchestratorResult};

/// Environment variable carrying the search API key
pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    // Research settings
    pub max_research_results: usize,
    pub research_timeout: Duration,

    // LLM settings
    pub llm_timeout: Duration,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub ollama_temperature: f32,
    pub ollama_embed_model: String,

    // Caching settings
    pub enable_caching: bool,
    pub cache_size_limit: usize,

    // Vector storage settings
    pub vector_storage_enabled: bool,
    pub vector_dir: PathBuf,

    // Search API settings
    pub tavily_api_key: Option<String>,
    pub tavily_base_url: String,
    pub tavily_search_depth: SearchDepth,

    // Performance flags
    pub enable_parallel_processing: bool,
    pub skip_vector_storage: bool,
    pub use_quick_mode: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let ollama = OllamaConfig::default();
        Self {
            max_research_results: 3,
            research_timeout: Duration::from_secs(30),
            llm_timeout: ollama.timeout,
            ollama_base_url: ollama.base_url,
            ollama_model: ollama.model,
            ollama_temperature: ollama.temperature,
            ollama_embed_model: ollama.embed_model,
            enable_caching: true,
            cache_size_limit: 100,
            vector_storage_enabled: true,
            vector_dir: PathBuf::from("./data/vector_db"),
            tavily_api_key: None,
            tavily_base_url: "https://api.tavily.com".to_string(),
            tavily_search_depth: SearchDepth::Basic,
            enable_parallel_processing: true,
            skip_vector_storage: false,
            use_quick_mode: false,
        }
    }
}

impl PipelineConfig {
    /// Load from `.env` and the process environment
    pub fn from_env() -> OrchestratorResult<Self> {
        // Missing .env is fine; real environment variables still apply
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> OrchestratorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self {
            max_research_results: parse_or(&get, "MAX_RESEARCH_RESULTS", defaults.max_research_results)?,
            research_timeout: Duration::from_secs(parse_or(
                &get,
                "RESEARCH_TIMEOUT",
                defaults.research_timeout.as_secs(),
            )?),
            llm_timeout: Duration::from_secs(parse_or(&get, "LLM_TIMEOUT", defaults.llm_timeout.as_secs())?),
            ollama_base_url: get("OLLAMA_BASE_URL").unwrap_or(defaults.ollama_base_url),
            ollama_model: get("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            ollama_temperature: parse_or(&get, "OLLAMA_TEMPERATURE", defaults.ollama_temperature)?,
            ollama_embed_model: get("OLLAMA_EMBED_MODEL").unwrap_or(defaults.ollama_embed_model),
            enable_caching: flag_or(&get, "ENABLE_CACHING", defaults.enable_caching),
            cache_size_limit: parse_or(&get, "CACHE_SIZE_LIMIT", defaults.cache_size_limit)?,
            vector_storage_enabled: flag_or(&get, "VECTOR_STORAGE_ENABLED", defaults.vector_storage_enabled),
            vector_dir: get("VECTOR_DIR").map(PathBuf::from).unwrap_or(defaults.vector_dir),
            tavily_api_key: get(TAVILY_API_KEY),
            tavily_base_url: get("TAVILY_BASE_URL").unwrap_or(defaults.tavily_base_url),
            tavily_search_depth: parse_or(&get, "TAVILY_SEARCH_DEPTH", defaults.tavily_search_depth)?,
            enable_parallel_processing: flag_or(
                &get,
                "ENABLE_PARALLEL_PROCESSING",
                defaults.enable_parallel_processing,
            ),
            skip_vector_storage: flag_or(&get, "SKIP_VECTOR_STORAGE", defaults.skip_vector_storage),
            use_quick_mode: flag_or(&get, "USE_QUICK_MODE", defaults.use_quick_mode),
        };

        if config.use_quick_mode {
            config.apply_quick_mode();
        }
        config.validate()?;
        Ok(config)
    }

    /// Quick mode: fewer results, shorter timeout, no vector storage, caching on
    pub fn apply_quick_mode(&mut self) {
        self.use_quick_mode = true;
        self.max_research_results = 2;
        self.research_timeout = Duration::from_secs(15);
        self.skip_vector_storage = true;
        self.enable_caching = true;
    }

    pub fn validate(&self) -> OrchestratorResult<()> {
        if self.cache_size_limit == 0 {
            return Err(OrchestratorError::config("CACHE_SIZE_LIMIT must be at least 1"));
        }
        if self.max_research_results == 0 {
            return Err(OrchestratorError::config("MAX_RESEARCH_RESULTS must be at least 1"));
        }
        Ok(())
    }

    /// Whether the vectorize stage should skip the store entirely
    pub fn vector_storage_skipped(&self) -> bool {
        self.skip_vector_storage || !self.vector_storage_enabled
    }

    /// The search API key, required before any pipeline is built
    pub fn require_search_key(&self) -> OrchestratorResult<&str> {
        self.tavily_api_key
            .as_deref()
            .ok_or_else(|| OrchestratorError::MissingApiKey { key: TAVILY_API_KEY.to_string() })
    }

    pub fn ollama_config(&self) -> OllamaConfig {
        OllamaConfig {
            base_url: self.ollama_base_url.clone(),
            model: self.ollama_model.clone(),
            embed_model: self.ollama_embed_model.clone(),
            temperature: self.ollama_temperature,
            timeout: self.llm_timeout,
        }
    }

    pub fn tavily_config(&self) -> OrchestratorResult<TavilyConfig> {
        Ok(TavilyConfig {
            base_url: self.tavily_base_url.clone(),
            api_key: self.require_search_key()?.to_string(),
            search_depth: self.tavily_search_depth,
            timeout: self.research_timeout,
        })
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.vector_dir.join("chat_sessions")
    }
}

fn flag_or<G>(get: &G, key: &str, default: bool) -> bool
where
    G: Fn(&str) -> Option<String>,
{
    get(key).map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(default)
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> OrchestratorResult<T>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| OrchestratorError::config(format!("{key} has invalid value '{raw}'"))),
        None => Ok(default),
    }
}
