//! HTTP surface of aerodesk.
//!
//! [`build_router`] wires the contact endpoints to an [`AppState`] that owns
//! the injected submission store:
//!
//! - `POST /api/contact` validates and stores a submission (201 / 400 / 500)
//! - `GET /api/contact-submissions` lists submissions newest-first (200 / 500)
//! - `GET /healthz` liveness probe

pub mod handlers;
pub mod response;
mod request_tracing;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;

use crate::config::Config;
use crate::store::{InMemorySubmissionStore, SubmissionRepository};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where validated submissions go.
    pub submissions: Arc<dyn SubmissionRepository>,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Build state around an existing repository.
    #[must_use]
    pub fn new(submissions: Arc<dyn SubmissionRepository>, max_body_bytes: usize) -> Self {
        Self {
            submissions,
            max_body_bytes,
        }
    }

    /// Build state from configuration with a fresh, empty in-memory store.
    #[must_use]
    pub fn init(config: &Config) -> Self {
        let store = InMemorySubmissionStore::new().with_capacity_limit(config.store.max_submissions);
        Self::new(Arc::new(store), config.server.max_body_bytes)
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(handlers::create_contact_handler))
        .route(
            "/api/contact-submissions",
            get(handlers::list_submissions_handler),
        )
        .route("/healthz", get(handlers::healthz_handler))
        .layer(from_fn(request_tracing::request_tracing_middleware))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}
