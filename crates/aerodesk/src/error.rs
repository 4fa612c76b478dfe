//! Error types for aerodesk.
//!
//! This module defines all error types used throughout the aerodesk crate.
//! Validation failures carry field-level detail so the HTTP layer can report
//! them; everything else is an unexpected failure from the caller's view.

use thiserror::Error;

use crate::validation::ValidationError;

/// The main error type for aerodesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A contact payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // === Store Errors ===
    /// The submission store reached its configured capacity.
    #[error("submission store is full ({capacity} submissions)")]
    StoreFull {
        /// The configured capacity.
        capacity: usize,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// Failed to bind the HTTP listener.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error.
    #[error("server error: {0}")]
    Serve(String),

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for aerodesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is the store refusing new submissions.
    #[must_use]
    pub fn is_store_full(&self) -> bool {
        matches!(self, Self::StoreFull { .. })
    }
}
