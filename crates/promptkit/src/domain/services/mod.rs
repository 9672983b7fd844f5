//! Domain Services
//!
//! Pure, stateless operations over domain entities.

pub mod compiler;
pub mod template_check;
pub mod validator;

pub use compiler::{compile, extract_placeholders, sanitize_value};
pub use template_check::{check_template, SchemaMismatch, TemplateReport};
pub use validator::{validate, validate_field};
