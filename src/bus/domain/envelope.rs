//! Fields shared by every inbound command.

use crate::validation::{PayloadReader, ValidationResult};
use serde_json::Value;

/// Correlation key and target id carried by every command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandEnvelope {
    /// Caller token echoed verbatim in the response.
    pub correlation_key: String,
    /// Target entity identifier.
    pub id: String,
}

impl CommandEnvelope {
    /// Creates an envelope.
    #[must_use]
    pub fn new(correlation_key: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            correlation_key: correlation_key.into(),
            id: id.into(),
        }
    }

    /// Reads the required `correlationKey` and `id` fields.
    pub fn read(reader: &mut PayloadReader<'_>) -> Option<Self> {
        let correlation_key = reader.required_string("correlationKey");
        let id = reader.required_string("id");
        Some(Self {
            correlation_key: correlation_key?,
            id: id?,
        })
    }

    /// Validates a payload that carries nothing beyond the envelope, as
    /// delete commands do.
    ///
    /// # Errors
    ///
    /// Returns [`crate::validation::ValidationError`] when either field is
    /// missing, empty or not a string.
    pub fn parse(payload: &Value) -> ValidationResult<Self> {
        let mut reader = PayloadReader::new(payload);
        let envelope = Self::read(&mut reader);
        reader.finish(envelope)
    }

    /// Extracts whatever correlation data a payload carries, without
    /// validating it.
    ///
    /// Used to address failure responses for payloads that did not pass
    /// validation; absent or non-string fields become empty strings.
    #[must_use]
    pub fn lenient(payload: &Value) -> Self {
        let text = |field: &str| {
            payload
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            correlation_key: text("correlationKey"),
            id: text("id"),
        }
    }
}
