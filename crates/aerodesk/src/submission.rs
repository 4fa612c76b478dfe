//! Core submission types for aerodesk.
//!
//! This module defines the records the contact form produces: the validated
//! input ([`NewContact`]) and the stored record ([`ContactSubmission`]) that
//! adds an identity and a submission time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a stored submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Generate a fresh random (v4) identifier.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A contact-form payload that passed validation.
///
/// Holds exactly the four user-supplied fields. Produced only by
/// [`crate::validation::validate_contact`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    /// Sender's name.
    pub name: String,

    /// Sender's email address.
    pub email: String,

    /// Sender's company, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Free-form message body.
    pub message: String,
}

/// A stored contact submission.
///
/// Created once by a submission store and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    /// Unique identifier assigned at creation.
    pub id: SubmissionId,

    /// Sender's name.
    pub name: String,

    /// Sender's email address.
    pub email: String,

    /// Sender's company, omitted from JSON when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Free-form message body.
    pub message: String,

    /// When the store accepted this submission.
    pub submitted_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Combine validated input with an identity and timestamp.
    #[must_use]
    pub fn new(id: SubmissionId, contact: NewContact, submitted_at: DateTime<Utc>) -> Self {
        let NewContact {
            name,
            email,
            company,
            message,
        } = contact;
        Self {
            id,
            name,
            email,
            company,
            message,
            submitted_at,
        }
    }

    /// The user-supplied fields of this submission.
    #[must_use]
    pub fn contact(&self) -> NewContact {
        NewContact {
            name: self.name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            message: self.message.clone(),
        }
    }
}
