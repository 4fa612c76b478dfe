//! `aerodesk` - contact-form service for the UAV systems marketing site
//!
//! This library validates contact-form submissions, keeps them in an
//! in-memory store and exposes both through a small JSON HTTP API.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod server;
pub mod store;
pub mod submission;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};
pub use http::{build_router, AppState};
pub use logging::init_logging;
pub use store::{InMemorySubmissionStore, SubmissionRepository};
pub use submission::{ContactSubmission, NewContact, SubmissionId};
pub use validation::{validate_contact, FieldError, ValidationError};
