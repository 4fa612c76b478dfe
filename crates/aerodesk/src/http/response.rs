//! JSON response envelope shared by all API endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::validation::{FieldError, ValidationError};

/// Error text for a rejected contact payload.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Error text when a valid submission could not be stored.
pub const SUBMIT_FAILED: &str = "Failed to submit contact form";

/// Error text when submissions could not be read.
pub const FETCH_FAILED: &str = "Failed to fetch submissions";

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    success: bool,
    data: T,
}

/// `{ "success": false, "error": ..., "details"?: [...] }`
#[derive(Debug, Serialize)]
pub struct FailureBody {
    success: bool,
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldError>>,
}

/// Wrap `data` in a success envelope with the given status.
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(SuccessBody {
            success: true,
            data,
        }),
    )
        .into_response()
}

/// A failure envelope without field details.
pub fn failure(status: StatusCode, error: &'static str) -> Response {
    (
        status,
        Json(FailureBody {
            success: false,
            error,
            details: None,
        }),
    )
        .into_response()
}

/// HTTP 400 carrying every field error.
pub fn validation_failed(err: ValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(FailureBody {
            success: false,
            error: VALIDATION_FAILED,
            details: Some(err.into_errors()),
        }),
    )
        .into_response()
}
