//! Field-by-field reader over an untyped JSON payload.

use super::{
    error::{FieldIssue, FieldProblem, ValidationError, ValidationResult},
    rules,
};
use serde_json::{Map, Value};

/// Reads typed fields out of a JSON object while collecting issues.
///
/// Required readers return `None` exactly when they record an issue, so a
/// schema can read every field first and build its command only when
/// [`PayloadReader::finish`] reports no issues.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use skillsync::validation::PayloadReader;
///
/// let payload = json!({"id": "u1", "name": ""});
/// let mut reader = PayloadReader::new(&payload);
/// let id = reader.required_string("id");
/// let name = reader.optional_string("name");
/// let built = reader.finish(id.map(|id| (id, name)));
///
/// assert_eq!(built, Ok(("u1".to_owned(), Some(String::new()))));
/// ```
#[derive(Debug)]
pub struct PayloadReader<'a> {
    object: Option<&'a Map<String, Value>>,
    issues: Vec<FieldIssue>,
}

impl<'a> PayloadReader<'a> {
    /// Starts reading `payload`.
    ///
    /// A payload that is not a JSON object records a single issue; every
    /// later required field is then reported missing as well.
    #[must_use]
    pub fn new(payload: &'a Value) -> Self {
        let object = payload.as_object();
        let issues = if object.is_some() {
            Vec::new()
        } else {
            vec![FieldIssue::new(
                "payload",
                FieldProblem::WrongType {
                    expected: "an object",
                },
            )]
        };
        Self { object, issues }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.object
            .and_then(|object| object.get(name))
            .filter(|value| !value.is_null())
    }

    fn record(&mut self, field: &'static str, problem: FieldProblem) {
        self.issues.push(FieldIssue::new(field, problem));
    }

    fn string_field(&mut self, field: &'static str) -> Option<Option<&'a str>> {
        match self.field(field) {
            None => Some(None),
            Some(Value::String(value)) => Some(Some(value.as_str())),
            Some(_) => {
                self.record(field, FieldProblem::WrongType { expected: "a string" });
                None
            }
        }
    }

    /// Reads a required, non-empty string.
    pub fn required_string(&mut self, field: &'static str) -> Option<String> {
        match self.string_field(field)? {
            None => {
                self.record(field, FieldProblem::Missing);
                None
            }
            Some("") => {
                self.record(field, FieldProblem::Empty);
                None
            }
            Some(value) => Some(value.to_owned()),
        }
    }

    /// Reads an optional string; an empty string is accepted.
    pub fn optional_string(&mut self, field: &'static str) -> Option<String> {
        self.string_field(field).flatten().map(str::to_owned)
    }

    /// Reads an optional string that must not be empty when present.
    pub fn optional_non_empty_string(&mut self, field: &'static str) -> Option<String> {
        match self.string_field(field).flatten()? {
            "" => {
                self.record(field, FieldProblem::Empty);
                None
            }
            value => Some(value.to_owned()),
        }
    }

    /// Reads a required email address.
    pub fn required_email(&mut self, field: &'static str) -> Option<String> {
        let value = self.required_string(field)?;
        self.check_email(field, value)
    }

    /// Reads an optional email address.
    pub fn optional_email(&mut self, field: &'static str) -> Option<String> {
        let value = self.optional_string(field)?;
        self.check_email(field, value)
    }

    fn check_email(&mut self, field: &'static str, value: String) -> Option<String> {
        if rules::is_valid_email(&value) {
            Some(value)
        } else {
            self.record(field, FieldProblem::InvalidEmail);
            None
        }
    }

    /// Reads an optional array of strings.
    pub fn optional_string_list(&mut self, field: &'static str) -> Option<Vec<String>> {
        let wrong_type = FieldProblem::WrongType {
            expected: "an array of strings",
        };
        match self.field(field)? {
            Value::Array(items) => {
                let strings: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_owned))
                    .collect();
                if strings.is_none() {
                    self.record(field, wrong_type);
                }
                strings
            }
            _ => {
                self.record(field, wrong_type);
                None
            }
        }
    }

    /// Reads an optional string constrained to a closed set of values.
    pub fn optional_variant<T>(
        &mut self,
        field: &'static str,
        allowed: &'static [&'static str],
    ) -> Option<T>
    where
        T: for<'s> TryFrom<&'s str>,
    {
        let raw = self.string_field(field).flatten()?;
        let parsed = T::try_from(raw).ok();
        if parsed.is_none() {
            self.record(field, FieldProblem::UnknownVariant { allowed });
        }
        parsed
    }

    /// Returns `true` when no issue has been recorded so far.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Completes validation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] with every recorded issue, or when `built`
    /// is `None` despite no issue having been recorded.
    pub fn finish<T>(self, built: Option<T>) -> ValidationResult<T> {
        match built {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => Err(ValidationError::new(self.issues)),
        }
    }
}
