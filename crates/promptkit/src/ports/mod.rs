//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with the host (clipboard, selection, storage, time).
//!
//! Implementations of these traits live with the host: the CLI crate for a
//! terminal, test doubles in the tests.

mod clipboard;
mod clock;
mod draft_repository;

// Re-exports
pub use clipboard::*;
pub use clock::*;
pub use draft_repository::*;
