//! Application Services
//!
//! Orchestration over the domain and the ports: catalog lookup, clipboard
//! transfer, draft storage and debounced autosave.

pub mod autosave;
pub mod catalog;
pub mod clipboard;
pub mod drafts;

pub use autosave::{DraftAutosaver, DEFAULT_AUTOSAVE_DELAY};
pub use catalog::Catalog;
pub use clipboard::{
    select_all_text, transfer, ClipboardResult, ClipboardTier, COPY_COMMAND_FAILED,
    MANUAL_COPY_REQUIRED,
};
pub use drafts::{DraftStore, DEFAULT_DRAFT_FRESHNESS_HOURS};
