//! # Application Records and the Review State Machine
//!
//! An [`ApplicationRecord`] is what the employer sees: a nullifier, an
//! eligibility outcome, and a review status. The applicant's attributes are
//! never part of it.
//!
//! ## Status Lifecycle
//!
//! ```text
//! PENDING ─approve──▶ APPROVED   (terminal)
//!    │
//!    └────reject────▶ REJECTED   (terminal)
//! ```
//!
//! [`ApplicationStatus::can_transition_to`] is the single encoding of these
//! rules; the state store consults it before mutating any record. Records
//! persisted by earlier versions without a `status` field deserialize as
//! `PENDING`.

use serde::{Deserialize, Serialize};

use crate::identity::{ApplicationId, JobId, Nullifier};
use crate::temporal::Timestamp;

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Awaiting review. The only state transitions are defined out of.
    Pending,
    /// Approved by a reviewer. Terminal.
    Approved,
    /// Rejected by a reviewer. Terminal.
    Rejected,
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

impl ApplicationStatus {
    /// The canonical uppercase name as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }

    /// Whether a transition from `self` to `to` is permitted.
    ///
    /// Only `PENDING → APPROVED` and `PENDING → REJECTED` exist.
    pub fn can_transition_to(&self, to: ApplicationStatus) -> bool {
        matches!(
            (self, to),
            (
                ApplicationStatus::Pending,
                ApplicationStatus::Approved | ApplicationStatus::Rejected
            )
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applicant's application to one job.
///
/// Invariant: the `(job_id, applicant_nullifier)` pair is unique across all
/// records — enforced by the state store, backed by the nullifier's
/// one-per-(job, secret) derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    /// Unique application identifier.
    pub id: ApplicationId,
    /// The job applied to.
    pub job_id: JobId,
    /// The applicant's nullifier for this job.
    pub applicant_nullifier: Nullifier,
    /// Outcome of the eligibility check at submission time.
    pub proof_ok: bool,
    /// Submission time, epoch milliseconds.
    pub created_at: Timestamp,
    /// Review status. Missing in collections written by earlier versions;
    /// defaults to `PENDING` on read.
    #[serde(default)]
    pub status: ApplicationStatus,
    /// When the record left `PENDING`, if it has.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<Timestamp>,
    /// Optional reviewer note, at most 500 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_note: Option<String>,
}

/// A reviewer's decision on a pending application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDecision {
    /// The application under review.
    pub application_id: ApplicationId,
    /// The target status: `APPROVED` or `REJECTED`.
    pub status: ApplicationStatus,
    /// Optional note, at most 500 characters.
    pub note: Option<String>,
}
