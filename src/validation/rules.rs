//! Individual field rules shared by command schemas.

use regex::Regex;
use std::sync::LazyLock;

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal and is covered by unit tests"
)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email pattern should compile")
});

/// Checks email address syntax.
///
/// The local part may not start with a dot or contain consecutive dots; the
/// domain needs at least one dot and an alphabetic top-level label.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, _domain)) = value.split_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.contains("..") {
        return false;
    }
    EMAIL_PATTERN.is_match(value)
}
