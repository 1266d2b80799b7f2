//! Core shared types: documents, pipeline state and stage identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::SharedResult;

/// Component of the pipeline a log line or state increment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The run loop itself
    Orchestrator,
    /// Web research and findings
    Research,
    /// Summary and pitch generation
    Processing,
    /// Vector store persistence
    Vectorize,
    /// Chat session persistence
    Session,
    /// Command line front-end
    Cli,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Orchestrator => "orchestrator",
            Stage::Research => "research",
            Stage::Processing => "processing",
            Stage::Vectorize => "vectorize",
            Stage::Session => "session",
            Stage::Cli => "cli",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a document came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Source label, `research` for real findings and `fallback` for synthetic ones
    pub source: String,
    /// Topic the document was produced for
    pub topic: String,
}

/// A unit of text flowing from research into summarization and the vector store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub const SOURCE_RESEARCH: &'static str = "research";
    pub const SOURCE_FALLBACK: &'static str = "fallback";

    pub fn new(page_content: impl Into<String>, source: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: DocumentMetadata {
                source: source.into(),
                topic: topic.into(),
            },
        }
    }

    /// Document wrapping real research findings
    pub fn research(page_content: impl Into<String>, topic: impl Into<String>) -> Self {
        Self::new(page_content, Self::SOURCE_RESEARCH, topic)
    }

    /// Synthetic document standing in for failed research
    pub fn fallback(page_content: impl Into<String>, topic: impl Into<String>) -> Self {
        Self::new(page_content, Self::SOURCE_FALLBACK, topic)
    }

    pub fn is_fallback(&self) -> bool {
        self.metadata.source == Self::SOURCE_FALLBACK
    }
}

/// Names of the state keys, as they appear in serialized state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    ResearchData,
    Documents,
    Summary,
    Pitch,
    VectorStatus,
}

impl StateKey {
    pub const ALL: [StateKey; 5] = [
        StateKey::ResearchData,
        StateKey::Documents,
        StateKey::Summary,
        StateKey::Pitch,
        StateKey::VectorStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::ResearchData => "research_data",
            StateKey::Documents => "documents",
            StateKey::Summary => "summary",
            StateKey::Pitch => "pitch",
            StateKey::VectorStatus => "vector_status",
        }
    }
}

/// Partial state returned by a single stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_status: Option<String>,
}

impl StateUpdate {
    pub fn research(research_data: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            research_data: Some(research_data.into()),
            documents: Some(documents),
            ..Default::default()
        }
    }

    pub fn processing(summary: impl Into<String>, pitch: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            pitch: Some(pitch.into()),
            ..Default::default()
        }
    }

    pub fn vector_status(status: impl Into<String>) -> Self {
        Self {
            vector_status: Some(status.into()),
            ..Default::default()
        }
    }

    /// Keys this increment writes
    pub fn keys(&self) -> Vec<StateKey> {
        StateKey::ALL
            .into_iter()
            .filter(|key| match key {
                StateKey::ResearchData => self.research_data.is_some(),
                StateKey::Documents => self.documents.is_some(),
                StateKey::Summary => self.summary.is_some(),
                StateKey::Pitch => self.pitch.is_some(),
                StateKey::VectorStatus => self.vector_status.is_some(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

/// State accumulated across one pipeline run
///
/// Merging is additive: a key an increment leaves unset keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_status: Option<String>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, update: StateUpdate) {
        let StateUpdate {
            research_data,
            documents,
            summary,
            pitch,
            vector_status,
        } = update;

        if research_data.is_some() {
            self.research_data = research_data;
        }
        if documents.is_some() {
            self.documents = documents;
        }
        if summary.is_some() {
            self.summary = summary;
        }
        if pitch.is_some() {
            self.pitch = pitch;
        }
        if vector_status.is_some() {
            self.vector_status = vector_status;
        }
    }

    pub fn contains(&self, key: StateKey) -> bool {
        match key {
            StateKey::ResearchData => self.research_data.is_some(),
            StateKey::Documents => self.documents.is_some(),
            StateKey::Summary => self.summary.is_some(),
            StateKey::Pitch => self.pitch.is_some(),
            StateKey::VectorStatus => self.vector_status.is_some(),
        }
    }

    pub fn research_data(&self) -> &str {
        self.research_data.as_deref().unwrap_or_default()
    }

    pub fn documents(&self) -> &[Document] {
        self.documents.as_deref().unwrap_or_default()
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    pub fn pitch(&self) -> &str {
        self.pitch.as_deref().unwrap_or_default()
    }

    pub fn vector_status(&self) -> &str {
        self.vector_status.as_deref().unwrap_or_default()
    }

    pub fn to_json(&self) -> SharedResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SharedResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
