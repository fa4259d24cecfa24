//! Storage and state errors.
//!
//! Variants are tagged so callers can branch on the failure kind instead of
//! inspecting message strings.

use thiserror::Error;

use zkjb_core::{ApplicationStatus, JobId, Nullifier};

/// Errors from persistence and state operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An application with the same `(job_id, nullifier)` already exists.
    #[error("duplicate application for job {job_id} (nullifier {nullifier})")]
    DuplicateApplication {
        /// The job applied to.
        job_id: JobId,
        /// The colliding nullifier.
        nullifier: Nullifier,
    },

    /// The referenced entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"job"` or `"application"`.
        kind: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// The requested status change is not a legal transition.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status of the record.
        from: ApplicationStatus,
        /// Requested target status.
        to: ApplicationStatus,
    },

    /// Approval requested for a record whose eligibility check failed.
    #[error("cannot approve an application whose proof did not verify")]
    ApprovalRequiresProof,

    /// Reviewer note exceeds the persisted length limit.
    #[error("reviewer note is {len} characters (max {max})")]
    NoteTooLong {
        /// Actual note length in characters.
        len: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// Backend I/O failure.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted collection could not be encoded or decoded.
    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
