//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Field: one input slot of a form (kind, constraints, options)
//! - Prompt: a prompt template and its field schema
//! - Value: user-supplied form values
//! - Draft: in-progress form values saved for later
//! - Report: validation errors

mod draft;
mod field;
mod prompt;
mod report;
mod value;

pub use draft::*;
pub use field::*;
pub use prompt::*;
pub use report::*;
pub use value::*;
