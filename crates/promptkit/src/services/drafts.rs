//! Draft Store - Best-effort persistence of in-progress form values
//!
//! Drafts expire after a freshness window (24 hours by default). Storage
//! failures are logged and swallowed: losing a draft never blocks a form.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{Draft, FormValues};
use crate::ports::{Clock, DraftRepository, SystemClock};

/// Default freshness window for drafts
pub const DEFAULT_DRAFT_FRESHNESS_HOURS: i64 = 24;

/// Draft store over a repository
pub struct DraftStore<R: DraftRepository> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    freshness: Duration,
}

impl<R: DraftRepository> DraftStore<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            clock: Arc::new(SystemClock),
            freshness: Duration::hours(DEFAULT_DRAFT_FRESHNESS_HOURS),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Save the values for a template, stamped with the current time
    pub async fn save_draft(&self, template_id: &str, values: &FormValues) {
        let draft = Draft::new(template_id, values.clone(), self.clock.now());
        if let Err(e) = self.repo.save(&draft).await {
            tracing::warn!("Failed to save form draft for {}: {}", template_id, e);
        }
    }

    /// Saved values for a template, if a fresh draft exists
    ///
    /// A stale draft is deleted on the way out.
    pub async fn restore(&self, template_id: &str) -> Option<FormValues> {
        let draft = match self.repo.load(template_id).await {
            Ok(draft) => draft?,
            Err(e) => {
                tracing::warn!("Failed to read form draft for {}: {}", template_id, e);
                return None;
            }
        };

        if draft.is_fresh(self.clock.now(), self.freshness) {
            return Some(draft.values);
        }

        tracing::debug!(
            "Discarding stale draft for {} (saved {})",
            template_id,
            draft.saved_at
        );
        self.clear(template_id).await;
        None
    }

    /// Delete the draft for a template
    pub async fn clear(&self, template_id: &str) {
        if let Err(e) = self.repo.delete(template_id).await {
            tracing::warn!("Failed to clear form draft for {}: {}", template_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDraftRepository;
    use crate::domain::{DomainError, FieldValue};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::Mutex;

    struct FixedClock(Mutex<DateTime<Utc>>);

    impl FixedClock {
        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn sample_values() -> FormValues {
        FormValues::from([("topic".to_string(), FieldValue::from("Rust"))])
    }

    fn store_with_clock() -> (DraftStore<InMemoryDraftRepository>, Arc<FixedClock>, Arc<InMemoryDraftRepository>) {
        let repo = Arc::new(InMemoryDraftRepository::new());
        let clock = Arc::new(FixedClock(Mutex::new(Utc::now())));
        let store = DraftStore::new(repo.clone()).with_clock(clock.clone());
        (store, clock, repo)
    }

    #[tokio::test]
    async fn test_save_and_restore() {
        let (store, _, _) = store_with_clock();
        store.save_draft("essay", &sample_values()).await;

        assert_eq!(store.restore("essay").await, Some(sample_values()));
        assert_eq!(store.restore("other").await, None);
    }

    #[tokio::test]
    async fn test_stale_draft_is_discarded() {
        let (store, clock, repo) = store_with_clock();
        store.save_draft("essay", &sample_values()).await;

        clock.advance(Duration::hours(23));
        assert!(store.restore("essay").await.is_some());

        clock.advance(Duration::hours(1));
        assert_eq!(store.restore("essay").await, None);
        assert_eq!(repo.load("essay").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_custom_freshness() {
        let (store, clock, _) = store_with_clock();
        let store = store.with_freshness(Duration::minutes(5));
        store.save_draft("essay", &sample_values()).await;

        clock.advance(Duration::minutes(6));
        assert_eq!(store.restore("essay").await, None);
    }

    #[tokio::test]
    async fn test_clear() {
        let (store, _, _) = store_with_clock();
        store.save_draft("essay", &sample_values()).await;
        store.clear("essay").await;

        assert_eq!(store.restore("essay").await, None);
    }

    struct BrokenRepository;

    #[async_trait]
    impl DraftRepository for BrokenRepository {
        async fn load(&self, _template_id: &str) -> Result<Option<Draft>, DomainError> {
            Err(DomainError::Repository("storage full".into()))
        }

        async fn save(&self, _draft: &Draft) -> Result<(), DomainError> {
            Err(DomainError::Repository("storage full".into()))
        }

        async fn delete(&self, _template_id: &str) -> Result<bool, DomainError> {
            Err(DomainError::Repository("storage full".into()))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_are_swallowed() {
        let store = DraftStore::new(Arc::new(BrokenRepository));

        store.save_draft("essay", &sample_values()).await;
        store.clear("essay").await;
        assert_eq!(store.restore("essay").await, None);
    }
}
