//! Draft Repository Port
//!
//! Abstract interface for device-local draft persistence.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Draft};

/// Repository interface for drafts, keyed by template id
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Find the draft for a template
    async fn load(&self, template_id: &str) -> Result<Option<Draft>, DomainError>;

    /// Save a draft (insert or replace)
    async fn save(&self, draft: &Draft) -> Result<(), DomainError>;

    /// Delete the draft for a template
    async fn delete(&self, template_id: &str) -> Result<bool, DomainError>;
}
