//! File-persisted vector store over an embedding collaborator
//!
//! Records are read from `<dir>/<collection>.json` on first use, held in memory
//! behind a mutex and rewritten after every insert, so a later process sees the
//! research earlier runs stored. Opening a store touches nothing on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{stage_debug, Document, Stage};
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};

use crate::core::text::cosine_similarity;
use crate::error::{AgentError, AgentResult};
use crate::traits::{Embedder, VectorStore};
use crate::types::ScoredDocument;

pub const DEFAULT_COLLECTION: &str = "startup_vectors";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VectorRecord {
    id: String,
    document: Document,
    embedding: Vec<f32>,
}

type Records<'a> = MutexGuard<'a, Option<Vec<VectorRecord>>>;

/// Vector store persisted as one JSON file per collection
pub struct LocalVectorStore<E: Embedder> {
    embedder: E,
    path: PathBuf,
    records: Mutex<Option<Vec<VectorRecord>>>,
}

impl<E: Embedder> LocalVectorStore<E> {
    /// Point at the default collection under `dir`
    pub fn open(embedder: E, dir: impl AsRef<Path>) -> AgentResult<Self> {
        Self::open_collection(embedder, dir, DEFAULT_COLLECTION)
    }

    pub fn open_collection(embedder: E, dir: impl AsRef<Path>, collection: &str) -> AgentResult<Self> {
        if collection.trim().is_empty() {
            return Err(AgentError::config("collection name is required"));
        }

        Ok(Self {
            embedder,
            path: dir.as_ref().join(format!("{collection}.json")),
            records: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> AgentResult<usize> {
        Ok(self.loaded().await?.as_ref().map_or(0, Vec::len))
    }

    pub async fn is_empty(&self) -> AgentResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Lock the records, reading the collection file the first time through
    ///
    /// A file that fails to parse is reported and left in place; the next call
    /// retries the read.
    async fn loaded(&self) -> AgentResult<Records<'_>> {
        let mut records = self.records.lock().await;
        if records.is_none() {
            let loaded = self.read_collection().await?;
            stage_debug!(Stage::Vectorize, "📂 Loaded {} with {} records", self.path.display(), loaded.len());
            *records = Some(loaded);
        }
        Ok(records)
    }

    async fn read_collection(&self) -> AgentResult<Vec<VectorRecord>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            AgentError::invalid_response("vector store", format!("unreadable collection {}: {e}", self.path.display()))
        })
    }

    /// Write all records through a temp file so readers never see a partial file
    async fn persist(&self, records: &[VectorRecord]) -> AgentResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }
        let content = serde_json::to_string(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<E: Embedder> VectorStore for LocalVectorStore<E> {
    async fn add_documents(&self, documents: &[Document]) -> AgentResult<String> {
        let texts: Vec<String> = documents.iter().map(|doc| doc.page_content.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;
        if embeddings.len() != documents.len() {
            return Err(AgentError::invalid_response(
                "embedder",
                format!("expected {} embeddings, got {}", documents.len(), embeddings.len()),
            ));
        }

        let mut records = self.loaded().await?;
        let mut updated = (*records).clone().unwrap_or_default();
        updated.extend(documents.iter().zip(embeddings).map(|(document, embedding)| VectorRecord {
            id: uuid::Uuid::new_v4().to_string(),
            document: document.clone(),
            embedding,
        }));

        self.persist(&updated).await?;
        *records = Some(updated);

        Ok(format!("Stored {} documents in vector database", documents.len()))
    }

    async fn similarity_search(&self, query: &str, k: usize) -> AgentResult<Vec<ScoredDocument>> {
        if k == 0 || self.is_empty().await? {
            return Ok(Vec::new());
        }

        let query_vector = self
            .embedder
            .embed(&[query.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::invalid_response("embedder", "no query embedding"))?;

        let records = self.loaded().await?;
        let mut scored: Vec<ScoredDocument> = records
            .iter()
            .flatten()
            .map(|record| ScoredDocument {
                document: record.document.clone(),
                score: cosine_similarity(&query_vector, &record.embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(k);
        Ok(scored)
    }
}
