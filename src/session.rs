//! Session credential storage behind a narrow get/set contract.

use std::{collections::HashMap, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::{OpenwhydError, Result},
    types::SessionRecord,
};

/// Key-value collaborator holding one [`SessionRecord`] per account id.
///
/// Implementations decide durability and eviction; concurrent writes to the
/// same account id are last-write-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, account_id: &str) -> Result<Option<SessionRecord>>;
    async fn set(&self, account_id: &str, record: SessionRecord) -> Result<()>;
}

/// File-backed store keeping one JSON record per account under the local
/// data directory.
pub struct FsSessionStore {
    root: PathBuf,
}

impl FsSessionStore {
    pub fn new() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("openwhyd-client/sessions");
        Self { root }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, account_id: &str) -> PathBuf {
        self.root.join(format!("{account_id}.json"))
    }
}

impl Default for FsSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for FsSessionStore {
    async fn get(&self, account_id: &str) -> Result<Option<SessionRecord>> {
        let path = self.record_path(account_id);
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(OpenwhydError::Store(e.to_string())),
        };

        let record =
            serde_json::from_str(&content).map_err(|e| OpenwhydError::Store(e.to_string()))?;
        Ok(Some(record))
    }

    async fn set(&self, account_id: &str, record: SessionRecord) -> Result<()> {
        let path = self.record_path(account_id);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| OpenwhydError::Store(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| OpenwhydError::Store(e.to_string()))?;
        async_fs::write(path, json)
            .await
            .map_err(|e| OpenwhydError::Store(e.to_string()))
    }
}

/// In-memory store for tests and embedders that manage persistence themselves.
#[derive(Default)]
pub struct MemorySessionStore {
    records: Mutex<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, account_id: &str) -> Result<Option<SessionRecord>> {
        Ok(self.records.lock().await.get(account_id).cloned())
    }

    async fn set(&self, account_id: &str, record: SessionRecord) -> Result<()> {
        self.records.lock().await.insert(account_id.to_string(), record);
        Ok(())
    }
}
