//! Email address syntax check.

use std::sync::OnceLock;

use regex::Regex;

/// Local part, `@`, dotted domain labels and an alphabetic TLD.
///
/// The regex engine has no lookahead, so the leading-dot and double-dot
/// rules live in [`EmailSyntax::is_valid`].
const EMAIL_PATTERN: &str = r"(?i)^[a-z0-9_'+.-]*[a-z0-9_+-]@(?:[a-z0-9][a-z0-9-]*\.)+[a-z]{2,}$";

/// A compiled email syntax matcher.
#[derive(Debug)]
pub struct EmailSyntax {
    regex: Regex,
}

impl EmailSyntax {
    /// Compile the email pattern.
    ///
    /// # Panics
    ///
    /// Panics if the built-in pattern is invalid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regex: Regex::new(EMAIL_PATTERN).expect("Invalid email pattern"),
        }
    }

    /// Shared instance, compiled on first use.
    #[must_use]
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<EmailSyntax> = OnceLock::new();
        SHARED.get_or_init(Self::new)
    }

    /// Check whether `candidate` is a syntactically valid email address.
    #[must_use]
    pub fn is_valid(&self, candidate: &str) -> bool {
        !candidate.starts_with('.') && !candidate.contains("..") && self.regex.is_match(candidate)
    }
}

impl Default for EmailSyntax {
    fn default() -> Self {
        Self::new()
    }
}
