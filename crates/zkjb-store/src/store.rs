//! # Job Board State Store
//!
//! [`JobBoardStore`] holds the working set of jobs and applications behind
//! `RwLock`s and is the single authority for the rules that span records:
//!
//! - `(job_id, nullifier)` uniqueness across all applications
//! - the `PENDING -> APPROVED | REJECTED` review state machine
//! - approval only when the eligibility check passed at submission
//! - the reviewer note length limit
//!
//! Every mutation persists through the repos before touching the cache, so
//! a failed persist leaves the in-memory state exactly as it was.

use std::sync::Arc;

use parking_lot::RwLock;

use zkjb_core::validation::limits;
use zkjb_core::{
    ApplicationId, ApplicationRecord, ApplicationStatus, JobId, JobPolicy, Nullifier,
    ReviewDecision, Timestamp,
};

use crate::backend::StorageBackend;
use crate::error::StoreError;
use crate::repo::{ApplicationRepo, JobRepo};

/// In-memory state over a storage backend.
pub struct JobBoardStore {
    job_repo: JobRepo,
    application_repo: ApplicationRepo,
    jobs: RwLock<Vec<JobPolicy>>,
    applications: RwLock<Vec<ApplicationRecord>>,
}

impl JobBoardStore {
    /// Open a store over `backend`, loading both collections.
    ///
    /// Loading is forgiving (missing or unreadable collections read as
    /// empty), so opening cannot fail on bad data.
    pub fn open(backend: Arc<dyn StorageBackend>) -> Self {
        let job_repo = JobRepo::new(backend.clone());
        let application_repo = ApplicationRepo::new(backend);
        let jobs = job_repo.list();
        let applications = application_repo.list();
        tracing::info!(
            jobs = jobs.len(),
            applications = applications.len(),
            "job board state loaded"
        );
        Self {
            job_repo,
            application_repo,
            jobs: RwLock::new(jobs),
            applications: RwLock::new(applications),
        }
    }

    // -- queries ------------------------------------------------------------

    /// All jobs, newest data as loaded or written.
    pub fn jobs(&self) -> Vec<JobPolicy> {
        self.jobs.read().clone()
    }

    /// One job by id.
    pub fn job(&self, id: &JobId) -> Option<JobPolicy> {
        self.jobs.read().iter().find(|job| job.id == *id).cloned()
    }

    /// All applications.
    pub fn applications(&self) -> Vec<ApplicationRecord> {
        self.applications.read().clone()
    }

    /// One application by id.
    pub fn application(&self, id: &ApplicationId) -> Option<ApplicationRecord> {
        self.applications
            .read()
            .iter()
            .find(|record| record.id == *id)
            .cloned()
    }

    /// All applications for one job.
    pub fn applications_for_job(&self, job_id: &JobId) -> Vec<ApplicationRecord> {
        self.applications
            .read()
            .iter()
            .filter(|record| record.job_id == *job_id)
            .cloned()
            .collect()
    }

    /// All applications in one status.
    pub fn applications_with_status(&self, status: ApplicationStatus) -> Vec<ApplicationRecord> {
        self.applications
            .read()
            .iter()
            .filter(|record| record.status == status)
            .cloned()
            .collect()
    }

    /// Applications still awaiting review.
    pub fn pending_applications(&self) -> Vec<ApplicationRecord> {
        self.applications_with_status(ApplicationStatus::Pending)
    }

    /// Whether an application for `(job_id, nullifier)` already exists.
    ///
    /// Read-only preview; [`Self::add_application`] re-checks under the
    /// write lock and is the authoritative gate.
    pub fn has_application(&self, job_id: &JobId, nullifier: &Nullifier) -> bool {
        self.applications
            .read()
            .iter()
            .any(|record| record.job_id == *job_id && record.applicant_nullifier == *nullifier)
    }

    // -- mutations ----------------------------------------------------------

    /// Persist a new job and add it to the working set.
    pub fn add_job(&self, job: JobPolicy) -> Result<JobPolicy, StoreError> {
        let mut jobs = self.jobs.write();
        let mut next = jobs.clone();
        next.push(job.clone());
        self.job_repo.save_all(&next)?;
        *jobs = next;
        tracing::info!(job_id = %job.id, title = %job.title, "job posted");
        Ok(job)
    }

    /// Persist a new application and add it to the working set.
    ///
    /// Rejects a second application carrying the same `(job_id, nullifier)`
    /// pair; this check is the one authority for duplicates.
    pub fn add_application(
        &self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, StoreError> {
        let mut applications = self.applications.write();
        let duplicate = applications.iter().any(|existing| {
            existing.job_id == record.job_id
                && existing.applicant_nullifier == record.applicant_nullifier
        });
        if duplicate {
            tracing::warn!(job_id = %record.job_id, "duplicate application blocked");
            return Err(StoreError::DuplicateApplication {
                job_id: record.job_id,
                nullifier: record.applicant_nullifier,
            });
        }
        let mut next = applications.clone();
        next.push(record.clone());
        self.application_repo.save_all(&next)?;
        *applications = next;
        tracing::info!(
            application_id = %record.id,
            job_id = %record.job_id,
            proof_ok = record.proof_ok,
            "application submitted"
        );
        Ok(record)
    }

    /// Apply a review decision to a pending application.
    ///
    /// Approval additionally requires that the eligibility check passed at
    /// submission time; rejection is allowed either way.
    pub fn review(&self, decision: &ReviewDecision) -> Result<ApplicationRecord, StoreError> {
        if let Some(note) = &decision.note {
            let len = note.chars().count();
            if len > limits::REVIEWER_NOTE_MAX {
                return Err(StoreError::NoteTooLong {
                    len,
                    max: limits::REVIEWER_NOTE_MAX,
                });
            }
        }

        let mut applications = self.applications.write();
        let index = applications
            .iter()
            .position(|record| record.id == decision.application_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "application",
                id: decision.application_id.to_string(),
            })?;

        let current = &applications[index];
        if !current.status.can_transition_to(decision.status) {
            return Err(StoreError::InvalidTransition {
                from: current.status,
                to: decision.status,
            });
        }
        if decision.status == ApplicationStatus::Approved && !current.proof_ok {
            return Err(StoreError::ApprovalRequiresProof);
        }

        let mut next = applications.clone();
        let record = &mut next[index];
        record.status = decision.status;
        record.reviewed_at = Some(Timestamp::now());
        record.reviewer_note = decision.note.clone();
        let updated = record.clone();

        self.application_repo.save_all(&next)?;
        *applications = next;
        tracing::info!(
            application_id = %updated.id,
            status = %updated.status,
            "application reviewed"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryBackend, StorageBackend};
    use crate::repo::APPLICATIONS_KEY;
    use zkjb_core::{Nullifier, RegionCode};

    /// Backend whose writes always fail, for persist-then-cache tests.
    struct FailingBackend;

    impl StorageBackend for FailingBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "disk says no",
            )))
        }
    }

    fn job() -> JobPolicy {
        JobPolicy {
            id: JobId::new(),
            title: "Protocol Engineer".to_string(),
            company: "Acme".to_string(),
            required_skills: vec!["Rust".to_string()],
            min_experience_years: 2,
            allowed_regions: vec![RegionCode::EU],
            created_at: Timestamp::from_millis(1),
        }
    }

    fn application(job_id: JobId, nullifier: &str, proof_ok: bool) -> ApplicationRecord {
        ApplicationRecord {
            id: ApplicationId::new(),
            job_id,
            applicant_nullifier: Nullifier::new(nullifier.to_string()).unwrap(),
            proof_ok,
            created_at: Timestamp::from_millis(2),
            status: ApplicationStatus::Pending,
            reviewed_at: None,
            reviewer_note: None,
        }
    }

    fn store() -> JobBoardStore {
        JobBoardStore::open(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn add_job_is_queryable_and_persisted() {
        let backend = Arc::new(MemoryBackend::new());
        let store = JobBoardStore::open(backend.clone());
        let posted = store.add_job(job()).unwrap();
        assert_eq!(store.job(&posted.id), Some(posted.clone()));

        // A fresh store over the same backend sees the job.
        let reopened = JobBoardStore::open(backend);
        assert_eq!(reopened.jobs(), vec![posted]);
    }

    #[test]
    fn duplicate_application_is_rejected() {
        let store = store();
        let posted = store.add_job(job()).unwrap();
        let nullifier = "ab".repeat(32);
        store
            .add_application(application(posted.id, &nullifier, true))
            .unwrap();
        let err = store
            .add_application(application(posted.id, &nullifier, true))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateApplication { .. }));
        assert_eq!(store.applications().len(), 1);
    }

    #[test]
    fn same_secret_and_job_derive_the_same_nullifier_and_are_rejected() {
        // A second attempt with the same secret is caught purely by the
        // nullifier, without the reviewer ever seeing the attributes.
        let store = store();
        let posted = store.add_job(job()).unwrap();
        let secret = zkjb_core::ApplicantSecret::generate();
        let first = zkjb_proof::derive_nullifier(&posted.id, &secret);
        let second = zkjb_proof::derive_nullifier(&posted.id, &secret);
        assert_eq!(first, second);

        store
            .add_application(application(posted.id, first.as_str(), true))
            .unwrap();
        let err = store
            .add_application(application(posted.id, second.as_str(), true))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateApplication { .. }));
        assert!(store.has_application(&posted.id, &first));
        assert_eq!(store.applications().len(), 1);
    }

    #[test]
    fn same_nullifier_for_different_jobs_is_allowed() {
        let store = store();
        let a = store.add_job(job()).unwrap();
        let b = store.add_job(job()).unwrap();
        let nullifier = "cd".repeat(32);
        store.add_application(application(a.id, &nullifier, true)).unwrap();
        store.add_application(application(b.id, &nullifier, true)).unwrap();
        assert_eq!(store.applications().len(), 2);
    }

    #[test]
    fn review_approves_pending_with_proof() {
        let store = store();
        let posted = store.add_job(job()).unwrap();
        let submitted = store
            .add_application(application(posted.id, &"ab".repeat(32), true))
            .unwrap();
        let reviewed = store
            .review(&ReviewDecision {
                application_id: submitted.id,
                status: ApplicationStatus::Approved,
                note: Some("great fit".to_string()),
            })
            .unwrap();
        assert_eq!(reviewed.status, ApplicationStatus::Approved);
        assert!(reviewed.reviewed_at.is_some());
        assert_eq!(reviewed.reviewer_note.as_deref(), Some("great fit"));
        assert!(store.pending_applications().is_empty());
        assert_eq!(
            store.applications_with_status(ApplicationStatus::Approved).len(),
            1
        );
    }

    #[test]
    fn approval_requires_passing_proof_but_rejection_does_not() {
        let store = store();
        let posted = store.add_job(job()).unwrap();
        let submitted = store
            .add_application(application(posted.id, &"ef".repeat(32), false))
            .unwrap();

        let err = store
            .review(&ReviewDecision {
                application_id: submitted.id,
                status: ApplicationStatus::Approved,
                note: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::ApprovalRequiresProof));

        let reviewed = store
            .review(&ReviewDecision {
                application_id: submitted.id,
                status: ApplicationStatus::Rejected,
                note: None,
            })
            .unwrap();
        assert_eq!(reviewed.status, ApplicationStatus::Rejected);
    }

    #[test]
    fn terminal_records_cannot_be_reviewed_again() {
        let store = store();
        let posted = store.add_job(job()).unwrap();
        let submitted = store
            .add_application(application(posted.id, &"01".repeat(32), true))
            .unwrap();
        store
            .review(&ReviewDecision {
                application_id: submitted.id,
                status: ApplicationStatus::Rejected,
                note: None,
            })
            .unwrap();
        let err = store
            .review(&ReviewDecision {
                application_id: submitted.id,
                status: ApplicationStatus::Approved,
                note: None,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidTransition {
                from: ApplicationStatus::Rejected,
                to: ApplicationStatus::Approved,
            }
        ));
    }

    #[test]
    fn oversized_note_is_rejected_before_any_state_change() {
        let store = store();
        let posted = store.add_job(job()).unwrap();
        let submitted = store
            .add_application(application(posted.id, &"23".repeat(32), true))
            .unwrap();
        let err = store
            .review(&ReviewDecision {
                application_id: submitted.id,
                status: ApplicationStatus::Approved,
                note: Some("x".repeat(501)),
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::NoteTooLong { len: 501, max: 500 }));
        assert_eq!(
            store.application(&submitted.id).unwrap().status,
            ApplicationStatus::Pending
        );
    }

    #[test]
    fn unknown_application_review_is_not_found() {
        let store = store();
        let err = store
            .review(&ReviewDecision {
                application_id: ApplicationId::new(),
                status: ApplicationStatus::Rejected,
                note: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "application", .. }));
    }

    #[test]
    fn failed_persist_leaves_cache_unchanged() {
        let store = JobBoardStore::open(Arc::new(FailingBackend));
        assert!(store.add_job(job()).is_err());
        assert!(store.jobs().is_empty());
        let err = store
            .add_application(application(JobId::new(), &"45".repeat(32), true))
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.applications().is_empty());
    }

    #[test]
    fn legacy_collection_backfills_status_on_open() {
        let backend = Arc::new(MemoryBackend::new());
        let raw = serde_json::json!([{
            "id": uuid::Uuid::new_v4(),
            "jobId": uuid::Uuid::new_v4(),
            "applicantNullifier": "67".repeat(32),
            "proofOk": true,
            "createdAt": 1_700_000_000_000_i64
        }]);
        backend.put(APPLICATIONS_KEY, &raw.to_string()).unwrap();
        let store = JobBoardStore::open(backend);
        assert_eq!(store.pending_applications().len(), 1);
    }
}
