//! PromptKit Domain Library
//!
//! Turns prompt templates into filled-in prompts: validate form values
//! against a field schema, compile them into the template, and deliver the
//! result to the clipboard.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: FieldSchema, PromptTemplate, FormValues, Draft
//!   - `services/`: `validate`, `compile`, `check_template`
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Host interfaces (clipboard, selection, drafts, clock)
//!
//! - **Services** (`services/`): Catalog, clipboard transfer, draft store, autosave
//!
//! - **Adapters** (`adapters/`): Host-independent port implementations
//!
//! # Usage
//!
//! ```rust,ignore
//! use promptkit::{compile, transfer, validate};
//!
//! let errors = validate(&template.fields, &values);
//! if errors.is_empty() {
//!     let prompt = compile(&template.template, &values);
//!     let result = transfer(&clipboard, &prompt).await;
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use adapters::InMemoryDraftRepository;
pub use domain::{
    check_template, compile, extract_placeholders, format_number, sanitize_value, validate,
    validate_field, DomainError, Draft, FieldKind, FieldSchema, FieldValue, FormValues,
    PromptTemplate, SchemaMismatch, TemplateReport, ValidationError,
};
pub use ports::{Clock, ClipboardHost, DraftRepository, SelectionHost, SystemClock};
pub use services::{
    select_all_text, transfer, Catalog, ClipboardResult, ClipboardTier, DraftAutosaver,
    DraftStore, COPY_COMMAND_FAILED, DEFAULT_AUTOSAVE_DELAY, DEFAULT_DRAFT_FRESHNESS_HOURS,
    MANUAL_COPY_REQUIRED,
};
