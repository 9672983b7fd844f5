//! Clipboard Transfer - Three-tier copy with manual fallback
//!
//! Tries the host's async clipboard first, then the legacy copy command on
//! a staged container. When both fail the result tells the caller to show
//! the text for manual copying (see [`select_all_text`]).

use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::ports::{ClipboardHost, SelectionHost};

/// Reported when the legacy copy command runs but does not copy
pub const COPY_COMMAND_FAILED: &str = "Copy command failed";

/// Reported when no programmatic tier is usable
pub const MANUAL_COPY_REQUIRED: &str = "Clipboard not available. Please manually copy the text.";

/// Which tier handled the transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardTier {
    /// Asynchronous clipboard write
    Async,
    /// Legacy copy command on a staged container
    Legacy,
    /// Nothing copied; the user has to copy by hand
    Manual,
}

/// Outcome of a clipboard transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub tier: ClipboardTier,
}

impl ClipboardResult {
    fn copied(tier: ClipboardTier) -> Self {
        Self {
            ok: true,
            error: None,
            tier,
        }
    }

    fn manual(message: &str) -> Self {
        Self {
            ok: false,
            error: Some(message.to_string()),
            tier: ClipboardTier::Manual,
        }
    }
}

/// Place `text` on the host clipboard
///
/// Never fails: an unusable clipboard is reported in the result.
pub async fn transfer<H>(host: &H, text: &str) -> ClipboardResult
where
    H: ClipboardHost + ?Sized,
{
    match host.write_text(text).await {
        Ok(()) => {
            tracing::debug!("📋 Copied {} bytes with async clipboard", text.len());
            return ClipboardResult::copied(ClipboardTier::Async);
        }
        Err(e) => tracing::debug!("Async clipboard unavailable: {}", e),
    }

    match legacy_copy(host, text) {
        Ok(true) => {
            tracing::debug!("📋 Copied {} bytes with legacy copy command", text.len());
            ClipboardResult::copied(ClipboardTier::Legacy)
        }
        Ok(false) => {
            tracing::warn!("Legacy copy command reported failure");
            ClipboardResult::manual(COPY_COMMAND_FAILED)
        }
        Err(e) => {
            tracing::warn!("Legacy copy unavailable: {}", e);
            ClipboardResult::manual(MANUAL_COPY_REQUIRED)
        }
    }
}

/// Select `target` so the user can copy it by hand
///
/// Returns whether the selection was made.
pub fn select_all_text<S>(host: &S, target: &S::Target) -> bool
where
    S: SelectionHost + ?Sized,
{
    match host.select_all_text(target) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Could not select text for manual copy: {}", e);
            false
        }
    }
}

fn legacy_copy<H>(host: &H, text: &str) -> Result<bool, DomainError>
where
    H: ClipboardHost + ?Sized,
{
    let mut guard = StagedGuard {
        host,
        staged: Some(host.stage_text(text)?),
    };
    host.select_staged(guard.staged_mut())?;
    host.exec_copy(guard.staged_mut())
}

/// Releases the staged container when dropped
struct StagedGuard<'a, H: ClipboardHost + ?Sized> {
    host: &'a H,
    staged: Option<H::Staged>,
}

impl<H: ClipboardHost + ?Sized> StagedGuard<'_, H> {
    fn staged_mut(&mut self) -> &mut H::Staged {
        self.staged
            .as_mut()
            .expect("staged container lives until the guard drops")
    }
}

impl<H: ClipboardHost + ?Sized> Drop for StagedGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(staged) = self.staged.take() {
            self.host.release_staged(staged);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Clone, Copy)]
    enum Outcome {
        Succeed,
        Refuse,
        Error,
    }

    /// Deterministic host: each tier does what it is told
    struct FakeHost {
        primary: Outcome,
        stage: Outcome,
        select: Outcome,
        command: Outcome,
        live: Mutex<Vec<String>>,
        copied: Mutex<Option<String>>,
    }

    impl FakeHost {
        fn new(primary: Outcome, command: Outcome) -> Self {
            Self {
                primary,
                stage: Outcome::Succeed,
                select: Outcome::Succeed,
                command,
                live: Mutex::new(Vec::new()),
                copied: Mutex::new(None),
            }
        }

        fn live_containers(&self) -> usize {
            self.live.lock().unwrap().len()
        }

        fn copied(&self) -> Option<String> {
            self.copied.lock().unwrap().clone()
        }
    }

    fn fail(tier: &str) -> DomainError {
        DomainError::Clipboard(format!("{tier} unavailable"))
    }

    #[async_trait]
    impl ClipboardHost for FakeHost {
        type Staged = (usize, bool);

        async fn write_text(&self, text: &str) -> Result<(), DomainError> {
            match self.primary {
                Outcome::Succeed => {
                    *self.copied.lock().unwrap() = Some(text.to_string());
                    Ok(())
                }
                _ => Err(fail("async clipboard")),
            }
        }

        fn stage_text(&self, text: &str) -> Result<Self::Staged, DomainError> {
            match self.stage {
                Outcome::Succeed => {
                    let mut live = self.live.lock().unwrap();
                    live.push(text.to_string());
                    Ok((live.len() - 1, false))
                }
                _ => Err(fail("document")),
            }
        }

        fn select_staged(&self, staged: &mut Self::Staged) -> Result<(), DomainError> {
            match self.select {
                Outcome::Succeed => {
                    staged.1 = true;
                    Ok(())
                }
                _ => Err(fail("selection")),
            }
        }

        fn exec_copy(&self, staged: &Self::Staged) -> Result<bool, DomainError> {
            assert!(staged.1, "copy command runs on a selection");
            match self.command {
                Outcome::Succeed => {
                    let text = self.live.lock().unwrap()[staged.0].clone();
                    *self.copied.lock().unwrap() = Some(text);
                    Ok(true)
                }
                Outcome::Refuse => Ok(false),
                Outcome::Error => Err(fail("copy command")),
            }
        }

        fn release_staged(&self, staged: Self::Staged) {
            self.live.lock().unwrap().remove(staged.0);
        }
    }

    #[tokio::test]
    async fn test_primary_tier() {
        let host = FakeHost::new(Outcome::Succeed, Outcome::Error);
        let result = transfer(&host, "hello").await;

        assert_eq!(result, ClipboardResult::copied(ClipboardTier::Async));
        assert_eq!(host.copied().as_deref(), Some("hello"));
        assert_eq!(host.live_containers(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_legacy_and_cleans_up() {
        let host = FakeHost::new(Outcome::Error, Outcome::Succeed);
        let result = transfer(&host, "hello").await;

        assert!(result.ok);
        assert_eq!(result.tier, ClipboardTier::Legacy);
        assert_eq!(result.error, None);
        assert_eq!(host.copied().as_deref(), Some("hello"));
        assert_eq!(host.live_containers(), 0);
    }

    #[tokio::test]
    async fn test_refused_copy_command() {
        let host = FakeHost::new(Outcome::Refuse, Outcome::Refuse);
        let result = transfer(&host, "hello").await;

        assert!(!result.ok);
        assert_eq!(result.error.as_deref(), Some(COPY_COMMAND_FAILED));
        assert_eq!(result.tier, ClipboardTier::Manual);
        assert_eq!(host.live_containers(), 0);
    }

    #[tokio::test]
    async fn test_both_tiers_unavailable() {
        let host = FakeHost::new(Outcome::Error, Outcome::Error);
        let result = transfer(&host, "hello").await;

        assert_eq!(result, ClipboardResult::manual(MANUAL_COPY_REQUIRED));
        assert_eq!(host.copied(), None);
        assert_eq!(host.live_containers(), 0);
    }

    #[tokio::test]
    async fn test_selection_failure_releases_container() {
        let mut host = FakeHost::new(Outcome::Error, Outcome::Succeed);
        host.select = Outcome::Error;
        let result = transfer(&host, "hello").await;

        assert_eq!(result.error.as_deref(), Some(MANUAL_COPY_REQUIRED));
        assert_eq!(host.live_containers(), 0);
    }

    #[tokio::test]
    async fn test_staging_failure() {
        let mut host = FakeHost::new(Outcome::Error, Outcome::Succeed);
        host.stage = Outcome::Error;
        let result = transfer(&host, "hello").await;

        assert!(!result.ok);
        assert_eq!(host.live_containers(), 0);
    }

    struct FakeScreen {
        selected: Mutex<Option<String>>,
        broken: bool,
    }

    impl SelectionHost for FakeScreen {
        type Target = str;

        fn select_all_text(&self, target: &str) -> Result<(), DomainError> {
            if self.broken {
                return Err(fail("selection"));
            }
            *self.selected.lock().unwrap() = Some(target.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_select_all_text() {
        let screen = FakeScreen {
            selected: Mutex::new(None),
            broken: false,
        };
        assert!(select_all_text(&screen, "compiled prompt"));
        assert_eq!(
            screen.selected.lock().unwrap().as_deref(),
            Some("compiled prompt")
        );

        let broken = FakeScreen {
            selected: Mutex::new(None),
            broken: true,
        };
        assert!(!select_all_text(&broken, "compiled prompt"));
    }
}
