//! File Draft Repository
//!
//! Persists drafts as one JSON object keyed by template id.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use promptkit::{DomainError, Draft, DraftRepository};

type DraftMap = HashMap<String, Draft>;

/// JSON-file implementation of DraftRepository
pub struct FileDraftRepository {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileDraftRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all drafts; a missing or corrupt file reads as empty
    async fn read_all(&self) -> Result<DraftMap, DomainError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(DraftMap::new()),
            Err(e) => {
                return Err(DomainError::Repository(format!(
                    "Failed to read {:?}: {e}",
                    self.path
                )))
            }
        };

        match serde_json::from_str(&content) {
            Ok(drafts) => Ok(drafts),
            Err(e) => {
                tracing::warn!("Failed to parse form drafts in {:?}: {}", self.path, e);
                Ok(DraftMap::new())
            }
        }
    }

    async fn write_all(&self, drafts: &DraftMap) -> Result<(), DomainError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                DomainError::Repository(format!("Failed to create {:?}: {e}", dir))
            })?;
        }

        let body = serde_json::to_string_pretty(drafts)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| DomainError::Repository(format!("Failed to write {:?}: {e}", self.path)))
    }
}

#[async_trait]
impl DraftRepository for FileDraftRepository {
    async fn load(&self, template_id: &str) -> Result<Option<Draft>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(template_id))
    }

    async fn save(&self, draft: &Draft) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut drafts = self.read_all().await?;
        drafts.insert(draft.template_id.clone(), draft.clone());
        self.write_all(&drafts).await
    }

    async fn delete(&self, template_id: &str) -> Result<bool, DomainError> {
        let _guard = self.lock.lock().await;
        let mut drafts = self.read_all().await?;
        if drafts.remove(template_id).is_none() {
            return Ok(false);
        }
        self.write_all(&drafts).await?;
        Ok(true)
    }
}
