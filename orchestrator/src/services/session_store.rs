//! File-backed session store
//!
//! Each session is one JSON file under the sessions directory. The file keeps
//! the listing metadata apart from the serialized conversation body, so a
//! body that no longer parses still lists with its title and timestamps.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::{stage_debug, stage_warn, ChatMessage, PipelineState, SessionRecord, SessionSummary, Stage};
use tokio::fs;

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::SessionStore;

/// On-disk envelope: metadata plus the conversation as a JSON string
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    id: String,
    #[serde(default = "untitled")]
    title: String,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    updated_at: i64,
    #[serde(default)]
    document: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionBody {
    #[serde(default)]
    messages: Vec<ChatMessage>,
    #[serde(default)]
    result: Option<PipelineState>,
}

fn untitled() -> String {
    SessionRecord::UNTITLED.to_string()
}

impl StoredSession {
    fn body(&self) -> SessionBody {
        serde_json::from_str(&self.document).unwrap_or_else(|e| {
            stage_warn!(Stage::Session, "⚠️ Session {} body is unreadable: {}", self.id, e);
            SessionBody::default()
        })
    }

    fn into_record(self) -> SessionRecord {
        let body = self.body();
        SessionRecord {
            id: self.id,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
            messages: body.messages,
            result: body.result,
        }
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Sessions stored as `<dir>/<id>.json`
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn session_path(&self, id: &str) -> OrchestratorResult<PathBuf> {
        let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(OrchestratorError::session(format!("invalid session id '{id}'")));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    async fn read(&self, id: &str) -> OrchestratorResult<Option<StoredSession>> {
        let path = self.session_path(id)?;
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn write(&self, messages: Vec<ChatMessage>, result: Option<PipelineState>, meta: StoredSession) -> OrchestratorResult<()> {
        let body = SessionBody { messages, result };
        let stored = StoredSession {
            document: serde_json::to_string(&body)?,
            ..meta
        };

        fs::create_dir_all(&self.dir).await?;
        let path = self.session_path(&stored.id)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(&stored)?).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn create_session(&self, title: &str, user_prompt: &str, result: &PipelineState) -> OrchestratorResult<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let ts = now();
        let messages = vec![ChatMessage::user(user_prompt), ChatMessage::assistant_for(result)];

        let meta = StoredSession {
            id: id.clone(),
            title: title.to_string(),
            created_at: ts,
            updated_at: ts,
            document: String::new(),
        };
        self.write(messages, Some(result.clone()), meta).await?;

        stage_debug!(Stage::Session, "💬 Created session {} '{}'", id, title);
        Ok(id)
    }

    async fn update_session(
        &self,
        id: &str,
        user_prompt: Option<String>,
        result: Option<PipelineState>,
    ) -> OrchestratorResult<()> {
        let Some(existing) = self.read(id).await? else {
            stage_debug!(Stage::Session, "Session {} not found, update ignored", id);
            return Ok(());
        };

        let body = existing.body();
        let mut messages = body.messages;
        if let Some(prompt) = user_prompt {
            messages.push(ChatMessage::user(prompt));
        }
        if let Some(result) = &result {
            messages.push(ChatMessage::assistant_for(result));
        }
        let result = result.or(body.result);

        let meta = StoredSession {
            updated_at: now().max(existing.created_at),
            ..existing
        };
        self.write(messages, result, meta).await?;

        stage_debug!(Stage::Session, "💬 Updated session {}", id);
        Ok(())
    }

    async fn get_session(&self, id: &str) -> OrchestratorResult<Option<SessionRecord>> {
        Ok(self.read(id).await?.map(StoredSession::into_record))
    }

    async fn list_sessions(&self) -> OrchestratorResult<Vec<SessionSummary>> {
        if !fs::try_exists(&self.dir).await? {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str::<StoredSession>(&content) {
                Ok(stored) => sessions.push(stored.summary()),
                Err(e) => stage_warn!(Stage::Session, "⚠️ Skipping unreadable session file {}: {}", path.display(), e),
            }
        }

        sessions.sort_by(|a, b| (b.updated_at, b.created_at).cmp(&(a.updated_at, a.created_at)));
        Ok(sessions)
    }
}
