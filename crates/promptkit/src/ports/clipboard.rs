//! Clipboard Host Port
//!
//! Abstract interface over the host's clipboard and text selection.
//! One method group per transfer tier:
//!
//! 1. `write_text` - the asynchronous clipboard API
//! 2. `stage_text` / `select_staged` / `exec_copy` / `release_staged` -
//!    the legacy copy command acting on a hidden, selected text container
//! 3. [`SelectionHost::select_all_text`] - select rendered text so the user
//!    can copy it by hand

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Host clipboard capability
#[async_trait]
pub trait ClipboardHost: Send + Sync {
    /// Off-screen text container used by the legacy copy command
    type Staged: Send;

    /// Write text with the asynchronous clipboard API
    async fn write_text(&self, text: &str) -> Result<(), DomainError>;

    /// Create a hidden, read-only container holding `text`
    fn stage_text(&self, text: &str) -> Result<Self::Staged, DomainError>;

    /// Select the entire contents of the container
    fn select_staged(&self, staged: &mut Self::Staged) -> Result<(), DomainError>;

    /// Run the legacy copy command on the current selection
    ///
    /// `Ok(false)` means the command ran but reported failure.
    fn exec_copy(&self, staged: &Self::Staged) -> Result<bool, DomainError>;

    /// Tear the container down
    fn release_staged(&self, staged: Self::Staged);
}

/// Host text-selection capability
pub trait SelectionHost {
    /// Handle to rendered text (a DOM node, a terminal region, ...)
    type Target: ?Sized;

    /// Select everything inside `target`, replacing any current selection
    fn select_all_text(&self, target: &Self::Target) -> Result<(), DomainError>;
}
