//! In-Memory Draft Repository
//!
//! Keeps drafts for the lifetime of the process. Used by tests and by
//! hosts without device storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{DomainError, Draft};
use crate::ports::DraftRepository;

/// Draft repository backed by a map
#[derive(Debug, Default)]
pub struct InMemoryDraftRepository {
    drafts: RwLock<HashMap<String, Draft>>,
}

impl InMemoryDraftRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftRepository for InMemoryDraftRepository {
    async fn load(&self, template_id: &str) -> Result<Option<Draft>, DomainError> {
        Ok(self.drafts.read().await.get(template_id).cloned())
    }

    async fn save(&self, draft: &Draft) -> Result<(), DomainError> {
        self.drafts
            .write()
            .await
            .insert(draft.template_id.clone(), draft.clone());
        Ok(())
    }

    async fn delete(&self, template_id: &str) -> Result<bool, DomainError> {
        Ok(self.drafts.write().await.remove(template_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormValues;
    use chrono::Utc;

    #[tokio::test]
    async fn test_save_load_delete() {
        let repo = InMemoryDraftRepository::new();
        let draft = Draft::new("essay", FormValues::new(), Utc::now());

        repo.save(&draft).await.unwrap();
        assert_eq!(repo.load("essay").await.unwrap(), Some(draft));

        assert!(repo.delete("essay").await.unwrap());
        assert!(!repo.delete("essay").await.unwrap());
        assert_eq!(repo.load("essay").await.unwrap(), None);
    }
}
