//! Storage layer for aerodesk.
//!
//! Submissions live only in process memory. Handlers talk to the store
//! through [`SubmissionRepository`] so the concrete store is chosen once at
//! startup and injected into the router state.

mod clock;
mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::submission::{ContactSubmission, NewContact, SubmissionId};

pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub(crate) use clock::ManualClock;
pub use memory::InMemorySubmissionStore;

/// Keyed collection of contact submissions.
#[async_trait]
pub trait SubmissionRepository: Send + Sync + std::fmt::Debug {
    /// Store a validated contact under a fresh identifier and the current
    /// time, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot accept more submissions.
    async fn create(&self, contact: NewContact) -> Result<ContactSubmission>;

    /// All submissions, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn list(&self) -> Result<Vec<ContactSubmission>>;

    /// Look up one submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn get(&self, id: SubmissionId) -> Result<Option<ContactSubmission>>;

    /// Number of stored submissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn count(&self) -> Result<usize>;
}
