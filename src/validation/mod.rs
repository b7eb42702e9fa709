//! Structural validation of inbound command payloads.
//!
//! Payloads arrive as untyped JSON. Each command kind reads its fields
//! through a [`PayloadReader`], which records every missing or malformed
//! field instead of stopping at the first one. The collected issues become
//! a single [`ValidationError`].

pub mod error;
pub mod reader;
pub mod rules;

pub use error::{FieldIssue, FieldProblem, ValidationError, ValidationResult};
pub use reader::PayloadReader;
