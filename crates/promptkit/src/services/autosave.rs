//! Autosave - Debounced draft saving
//!
//! Each change reschedules the save; only the last values within the
//! debounce delay are written. The caller owns the autosaver and decides
//! when to schedule, flush or cancel.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::drafts::DraftStore;
use crate::domain::FormValues;
use crate::ports::DraftRepository;

/// Default delay between the last change and the save
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

/// Debounced draft saver for one template
pub struct DraftAutosaver<R: DraftRepository + 'static> {
    store: Arc<DraftStore<R>>,
    template_id: String,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<R: DraftRepository + 'static> DraftAutosaver<R> {
    pub fn new(store: Arc<DraftStore<R>>, template_id: impl Into<String>, delay: Option<Duration>) -> Self {
        Self {
            store,
            template_id: template_id.into(),
            delay: delay.unwrap_or(DEFAULT_AUTOSAVE_DELAY),
            pending: Mutex::new(None),
        }
    }

    /// Save `values` after the delay, replacing any pending save
    ///
    /// Empty values are never saved. Must be called within a tokio runtime.
    pub fn schedule(&self, values: FormValues) {
        self.cancel();
        if values.is_empty() {
            return;
        }

        let store = self.store.clone();
        let template_id = self.template_id.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.save_draft(&template_id, &values).await;
            tracing::debug!("💾 Draft saved for {}", template_id);
        });

        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(handle);
        }
    }

    /// Drop the pending save, if any
    ///
    /// A save already writing may still land; use [`Self::cancel_and_wait`]
    /// before touching the stored draft.
    pub fn cancel(&self) {
        if let Some(handle) = self.take_pending() {
            handle.abort();
        }
    }

    /// Drop the pending save and wait until its task has stopped
    pub async fn cancel_and_wait(&self) {
        if let Some(handle) = self.take_pending() {
            handle.abort();
            // Cancelled is the expected outcome
            let _ = handle.await;
        }
    }

    /// Save `values` now, replacing any pending save
    pub async fn flush(&self, values: &FormValues) {
        self.cancel_and_wait().await;
        if !values.is_empty() {
            self.store.save_draft(&self.template_id, values).await;
        }
    }

    /// Stop autosaving and delete the stored draft
    pub async fn discard(&self) {
        self.cancel_and_wait().await;
        self.store.clear(&self.template_id).await;
    }

    fn take_pending(&self) -> Option<JoinHandle<()>> {
        self.pending.lock().ok().and_then(|mut pending| pending.take())
    }
}

impl<R: DraftRepository + 'static> Drop for DraftAutosaver<R> {
    fn drop(&mut self) {
        self.cancel();
    }
}
