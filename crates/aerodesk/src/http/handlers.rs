//! Request handlers for the contact API.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::response::{failure, success, validation_failed, FETCH_FAILED, SUBMIT_FAILED};
use super::AppState;
use crate::error::{Error, Result};
use crate::submission::ContactSubmission;
use crate::validation::{validate_contact, ValidationError};

/// `POST /api/contact`
///
/// Validation runs to completion before the store is touched, so a rejected
/// payload never leaves a partial record behind. A body sent without a JSON
/// content type is read as an empty object.
pub async fn create_contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match submit_contact(&state, &headers, &body).await {
        Ok(submission) => success(StatusCode::CREATED, submission),
        Err(Error::Validation(e)) => {
            debug!(errors = e.errors().len(), "Contact payload failed validation");
            validation_failed(e)
        }
        Err(e) => {
            if e.is_store_full() {
                warn!(error = %e, "Refusing contact submission");
            } else {
                error!(error = %e, "Failed to store contact submission");
            }
            failure(StatusCode::INTERNAL_SERVER_ERROR, SUBMIT_FAILED)
        }
    }
}

async fn submit_contact(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<ContactSubmission> {
    let payload = if has_json_content_type(headers) {
        serde_json::from_slice(body).map_err(ValidationError::invalid_json)?
    } else {
        debug!("Contact payload has no JSON content type");
        Value::Object(serde_json::Map::new())
    };

    let contact = validate_contact(&payload)?;
    state.submissions.create(contact).await
}

/// `application/json` or any `application/*+json` media type.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    kind.eq_ignore_ascii_case("application")
        && (subtype.eq_ignore_ascii_case("json")
            || subtype.to_ascii_lowercase().ends_with("+json"))
}

/// `GET /api/contact-submissions`
pub async fn list_submissions_handler(State(state): State<AppState>) -> Response {
    match state.submissions.list().await {
        Ok(submissions) => success(StatusCode::OK, submissions),
        Err(e) => {
            error!(error = %e, "Failed to list contact submissions");
            failure(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
        }
    }
}

/// `GET /healthz`
pub async fn healthz_handler() -> axum::Json<Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn with_content_type(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(has_json_content_type(&with_content_type("application/json")));
        assert!(has_json_content_type(&with_content_type(
            "application/json; charset=utf-8"
        )));
        assert!(has_json_content_type(&with_content_type("Application/JSON")));
        assert!(has_json_content_type(&with_content_type(
            "application/merge-patch+json"
        )));
    }

    #[test]
    fn test_non_json_content_types() {
        assert!(!has_json_content_type(&HeaderMap::new()));
        assert!(!has_json_content_type(&with_content_type("text/plain")));
        assert!(!has_json_content_type(&with_content_type(
            "application/x-www-form-urlencoded"
        )));
        assert!(!has_json_content_type(&with_content_type("json")));
    }
}
