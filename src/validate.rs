//! Contact field validation and sanitization.
//!
//! All three fields are checked before any side effect; failures are collected
//! per field rather than stopping at the first. Name and message are trimmed
//! and HTML-escaped, the email is trimmed and lowercased.

use crate::error::{AppError, FieldError};
use regex::Regex;
use std::sync::OnceLock;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 1000;

pub const NAME_LENGTH_MESSAGE: &str = "Name must be between 2 and 100 characters";
pub const EMAIL_MESSAGE: &str = "Invalid email address";
pub const MESSAGE_LENGTH_MESSAGE: &str = "Message must be between 10 and 1000 characters";

/// A submission that passed validation. Fields are already sanitized and safe
/// to persist and forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"))
}

/// Trim and lowercase an email address so equal addresses compare equal.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

/// Escape HTML-significant characters so stored text is inert when rendered.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Validate all fields, collecting every failure. Returns the sanitized
/// contact only when nothing failed.
pub fn validate_contact(name: &str, email: &str, message: &str) -> Result<ValidContact, AppError> {
    let mut errors = Vec::new();

    let name = name.trim();
    let name_len = name.chars().count();
    if name_len < NAME_MIN || name_len > NAME_MAX {
        errors.push(FieldError {
            field: "name",
            message: NAME_LENGTH_MESSAGE,
        });
    }

    let email = normalize_email(email);
    if !email_regex().is_match(&email) {
        errors.push(FieldError {
            field: "email",
            message: EMAIL_MESSAGE,
        });
    }

    let message = message.trim();
    let message_len = message.chars().count();
    if message_len < MESSAGE_MIN || message_len > MESSAGE_MAX {
        errors.push(FieldError {
            field: "message",
            message: MESSAGE_LENGTH_MESSAGE,
        });
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(ValidContact {
        name: escape_html(name),
        email,
        message: escape_html(message),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_MESSAGE: &str = "Hello there, this is a test.";

    fn fields(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(errors) => errors.iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn accepts_a_minimal_valid_submission() {
        let contact = validate_contact("Al", "al@example.com", GOOD_MESSAGE).unwrap();
        assert_eq!(contact.name, "Al");
        assert_eq!(contact.email, "al@example.com");
        assert_eq!(contact.message, GOOD_MESSAGE);
    }

    #[test]
    fn name_length_bounds_are_inclusive() {
        assert!(validate_contact("A", "al@example.com", GOOD_MESSAGE).is_err());
        assert!(validate_contact(&"x".repeat(100), "al@example.com", GOOD_MESSAGE).is_ok());
        assert!(validate_contact(&"x".repeat(101), "al@example.com", GOOD_MESSAGE).is_err());
    }

    #[test]
    fn name_is_measured_after_trimming() {
        assert!(validate_contact("  A  ", "al@example.com", GOOD_MESSAGE).is_err());
        assert!(validate_contact("  Al  ", "al@example.com", GOOD_MESSAGE).is_ok());
    }

    #[test]
    fn message_length_bounds_are_inclusive() {
        assert!(validate_contact("Al", "al@example.com", "short").is_err());
        assert!(validate_contact("Al", "al@example.com", &"m".repeat(10)).is_ok());
        assert!(validate_contact("Al", "al@example.com", &"m".repeat(1000)).is_ok());
        assert!(validate_contact("Al", "al@example.com", &"m".repeat(1001)).is_err());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["", "plainaddress", "no-at.example.com", "two@@example.com", "a b@example.com"] {
            let err = validate_contact("Al", bad, GOOD_MESSAGE).unwrap_err();
            assert_eq!(fields(err), vec!["email"]);
        }
    }

    #[test]
    fn email_is_normalized_to_lowercase() {
        let contact = validate_contact("Al", "  Foo@Example.com ", GOOD_MESSAGE).unwrap();
        assert_eq!(contact.email, "foo@example.com");
    }

    #[test]
    fn failures_are_collected_across_fields() {
        let err = validate_contact("A", "al@example.com", "short").unwrap_err();
        assert_eq!(fields(err), vec!["name", "message"]);

        let err = validate_contact("A", "bogus", "short").unwrap_err();
        assert_eq!(fields(err), vec!["name", "email", "message"]);
    }

    #[test]
    fn name_and_message_are_html_escaped() {
        let contact = validate_contact(
            "<b>Al</b>",
            "al@example.com",
            "Hello & \"goodbye\" <script>'/'</script>",
        )
        .unwrap();
        assert_eq!(contact.name, "&lt;b&gt;Al&lt;&#x2F;b&gt;");
        assert_eq!(
            contact.message,
            "Hello &amp; &quot;goodbye&quot; &lt;script&gt;&#x27;&#x2F;&#x27;&lt;&#x2F;script&gt;"
        );
    }
}
