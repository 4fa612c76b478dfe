//! Contact payload validation.
//!
//! [`validate_contact`] turns an untyped JSON body into a [`NewContact`] or a
//! [`ValidationError`] listing every field that failed. Checks never stop at
//! the first failure, so a caller sees all problems with one request.
//!
//! | field     | rule |
//! |-----------|------|
//! | `name`    | required string, 1..=100 characters    |
//! | `email`   | required string, email syntax          |
//! | `company` | optional string, at most 100 characters |
//! | `message` | required string, 10..=1000 characters  |
//!
//! Lengths count UTF-16 code units, the way browsers count them, so a
//! character outside the Basic Multilingual Plane (most emoji) counts twice.
//! Unknown keys are dropped.
//!
//! # Example
//!
//! ```
//! use aerodesk::validation::validate_contact;
//!
//! let body = serde_json::json!({
//!     "name": "Ada",
//!     "email": "ada@x.com",
//!     "message": "Interested in your UAV platform."
//! });
//! let contact = validate_contact(&body).unwrap();
//! assert!(contact.company.is_none());
//! ```

mod email;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::submission::NewContact;

pub use email::EmailSyntax;

/// Maximum length of `name`.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of `company`.
pub const COMPANY_MAX_LEN: usize = 100;

/// Minimum length of `message`.
pub const MESSAGE_MIN_LEN: usize = 10;

/// Maximum length of `message`.
pub const MESSAGE_MAX_LEN: usize = 1000;

/// Field name used for errors about the request body as a whole.
pub const BODY_FIELD: &str = "body";

/// Machine-readable category of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Missing value or wrong JSON type.
    InvalidType,
    /// Shorter than the minimum length.
    TooSmall,
    /// Longer than the maximum length.
    TooBig,
    /// String present but in the wrong format.
    InvalidString,
    /// Body is not parseable JSON.
    InvalidJson,
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// What kind of rule failed.
    pub code: ErrorCode,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// A payload that failed one or more field rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed with {} field error(s)", .errors.len())]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Wrap a list of field errors.
    #[must_use]
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Error for a body that is not valid JSON.
    #[must_use]
    pub fn invalid_json(reason: impl std::fmt::Display) -> Self {
        Self::new(vec![FieldError::new(
            BODY_FIELD,
            ErrorCode::InvalidJson,
            format!("Invalid JSON: {reason}"),
        )])
    }

    /// The individual field errors, in field order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Consume into the field error list.
    #[must_use]
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Check whether any error concerns `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Validate an untyped contact payload.
///
/// # Errors
///
/// Returns a [`ValidationError`] holding every rule that failed.
pub fn validate_contact(input: &Value) -> Result<NewContact, ValidationError> {
    let Some(fields) = input.as_object() else {
        return Err(ValidationError::new(vec![FieldError::new(
            BODY_FIELD,
            ErrorCode::InvalidType,
            format!("Expected object, received {}", json_type(input)),
        )]));
    };

    let mut errors = Vec::new();

    let name = string_field(fields, "name", true, &mut errors).filter(|name| {
        check_length(
            "name",
            name,
            Some((1, "Name is required")),
            NAME_MAX_LEN,
            &mut errors,
        )
    });

    let email = string_field(fields, "email", true, &mut errors).filter(|email| {
        let valid = EmailSyntax::shared().is_valid(email);
        if !valid {
            errors.push(FieldError::new(
                "email",
                ErrorCode::InvalidString,
                "Invalid email address",
            ));
        }
        valid
    });

    let company = string_field(fields, "company", false, &mut errors)
        .filter(|company| check_length("company", company, None, COMPANY_MAX_LEN, &mut errors));

    let message = string_field(fields, "message", true, &mut errors).filter(|message| {
        check_length(
            "message",
            message,
            Some((MESSAGE_MIN_LEN, "Message must be at least 10 characters")),
            MESSAGE_MAX_LEN,
            &mut errors,
        )
    });

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(NewContact {
            name: name.to_string(),
            email: email.to_string(),
            company: company.map(str::to_string),
            message: message.to_string(),
        }),
        _ => Err(ValidationError::new(errors)),
    }
}

/// Look up a string field, recording a type error if it is missing or not a
/// string. Optional fields are only absent when the key is missing.
fn string_field<'a>(
    fields: &'a Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match fields.get(field) {
        None if required => {
            errors.push(FieldError::new(field, ErrorCode::InvalidType, "Required"));
            None
        }
        None => None,
        Some(Value::String(value)) => Some(value.as_str()),
        Some(other) => {
            errors.push(FieldError::new(
                field,
                ErrorCode::InvalidType,
                format!("Expected string, received {}", json_type(other)),
            ));
            None
        }
    }
}

fn check_length(
    field: &str,
    value: &str,
    min: Option<(usize, &str)>,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> bool {
    let len = utf16_len(value);
    if let Some((min_len, min_message)) = min {
        if len < min_len {
            errors.push(FieldError::new(field, ErrorCode::TooSmall, min_message));
            return false;
        }
    }
    if len > max {
        errors.push(FieldError::new(
            field,
            ErrorCode::TooBig,
            format!("String must contain at most {max} character(s)"),
        ));
        return false;
    }
    true
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
