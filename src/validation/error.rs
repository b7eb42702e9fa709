//! Validation error types for command payloads.

use std::fmt;
use thiserror::Error;

/// Result type for payload validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// What is wrong with a single payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    /// The field is required but absent or null.
    Missing,
    /// The field is a string but must not be empty.
    Empty,
    /// The field has the wrong JSON type.
    WrongType {
        /// Expected JSON type.
        expected: &'static str,
    },
    /// The field is not a syntactically valid email address.
    InvalidEmail,
    /// The field is not one of the allowed values.
    UnknownVariant {
        /// Accepted values.
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("is required"),
            Self::Empty => f.write_str("must not be empty"),
            Self::WrongType { expected } => write!(f, "must be {expected}"),
            Self::InvalidEmail => f.write_str("must be a valid email address"),
            Self::UnknownVariant { allowed } => {
                write!(f, "must be one of: {}", allowed.join(", "))
            }
        }
    }
}

/// A problem attached to a named payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// The problem found.
    pub problem: FieldProblem,
}

impl FieldIssue {
    /// Creates a field issue.
    #[must_use]
    pub const fn new(field: &'static str, problem: FieldProblem) -> Self {
        Self { field, problem }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {}", self.field, self.problem)
    }
}

/// A payload failed structural validation.
///
/// Always carries at least one [`FieldIssue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid message data: {}", format_issues(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Creates an error from collected issues.
    ///
    /// An empty list is replaced by a single issue against the whole
    /// payload so the error is never silent.
    #[must_use]
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        if issues.is_empty() {
            return Self {
                issues: vec![FieldIssue::new("payload", FieldProblem::Missing)],
            };
        }
        Self { issues }
    }

    /// Returns every recorded issue in field-read order.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Returns `true` when some issue concerns `field`.
    #[must_use]
    pub fn concerns(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}
