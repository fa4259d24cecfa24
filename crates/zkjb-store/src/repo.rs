//! # Typed Repositories
//!
//! Each repo owns one storage key and maps between a backend document and a
//! typed collection. The whole collection is read and rewritten per
//! operation; at demo scale that is the simplest thing that is correct.
//!
//! Reads are forgiving: a missing or unreadable collection logs and yields
//! an empty list, so a corrupted data directory degrades to a fresh board
//! instead of a crash. Writes are strict and surface every error.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use zkjb_core::{ApplicationId, ApplicationRecord, JobId, JobPolicy};

use crate::backend::StorageBackend;
use crate::error::StoreError;

/// Storage key for the job collection.
pub const JOBS_KEY: &str = "zkjb:jobs";
/// Storage key for the application collection.
pub const APPLICATIONS_KEY: &str = "zkjb:applications";

fn read_collection<T: DeserializeOwned>(
    backend: &dyn StorageBackend,
    key: &str,
) -> Vec<T> {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::error!(key, error = %e, "failed to read collection; treating as empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(key, error = %e, "failed to parse collection; treating as empty");
            Vec::new()
        }
    }
}

fn write_collection<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(items)?;
    backend.put(key, &raw)
}

/// Repository for [`JobPolicy`] records under [`JOBS_KEY`].
#[derive(Clone)]
pub struct JobRepo {
    backend: Arc<dyn StorageBackend>,
}

impl JobRepo {
    /// A repo over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// All persisted jobs. Never errors; unreadable data reads as empty.
    pub fn list(&self) -> Vec<JobPolicy> {
        read_collection(self.backend.as_ref(), JOBS_KEY)
    }

    /// Look up one job by id.
    pub fn find_by_id(&self, id: &JobId) -> Option<JobPolicy> {
        self.list().into_iter().find(|job| job.id == *id)
    }

    /// Persist the full job collection.
    pub fn save_all(&self, jobs: &[JobPolicy]) -> Result<(), StoreError> {
        write_collection(self.backend.as_ref(), JOBS_KEY, jobs)
    }

    /// Append one job and persist.
    pub fn create(&self, job: JobPolicy) -> Result<JobPolicy, StoreError> {
        let mut jobs = self.list();
        jobs.push(job.clone());
        self.save_all(&jobs)?;
        Ok(job)
    }
}

/// Repository for [`ApplicationRecord`]s under [`APPLICATIONS_KEY`].
///
/// Records written before the review fields existed deserialize with
/// `status: PENDING`; the serde default handles the backfill.
#[derive(Clone)]
pub struct ApplicationRepo {
    backend: Arc<dyn StorageBackend>,
}

impl ApplicationRepo {
    /// A repo over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// All persisted applications. Never errors; unreadable data reads as
    /// empty.
    pub fn list(&self) -> Vec<ApplicationRecord> {
        read_collection(self.backend.as_ref(), APPLICATIONS_KEY)
    }

    /// Look up one application by id.
    pub fn find_by_id(&self, id: &ApplicationId) -> Option<ApplicationRecord> {
        self.list().into_iter().find(|record| record.id == *id)
    }

    /// All applications for one job.
    pub fn find_by_job_id(&self, job_id: &JobId) -> Vec<ApplicationRecord> {
        self.list()
            .into_iter()
            .filter(|record| record.job_id == *job_id)
            .collect()
    }

    /// Persist the full application collection.
    pub fn save_all(&self, records: &[ApplicationRecord]) -> Result<(), StoreError> {
        write_collection(self.backend.as_ref(), APPLICATIONS_KEY, records)
    }

    /// Append one application and persist.
    pub fn create(&self, record: ApplicationRecord) -> Result<ApplicationRecord, StoreError> {
        let mut records = self.list();
        records.push(record.clone());
        self.save_all(&records)?;
        Ok(record)
    }

    /// Replace the record with `record.id`, persisting the collection.
    pub fn update(&self, record: ApplicationRecord) -> Result<ApplicationRecord, StoreError> {
        let mut records = self.list();
        let slot = records
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "application",
                id: record.id.to_string(),
            })?;
        *slot = record.clone();
        self.save_all(&records)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use zkjb_core::{ApplicationStatus, Nullifier, RegionCode, Timestamp};

    fn backend() -> Arc<dyn StorageBackend> {
        Arc::new(MemoryBackend::new())
    }

    fn job() -> JobPolicy {
        JobPolicy {
            id: JobId::new(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            required_skills: vec!["Rust".to_string()],
            min_experience_years: 2,
            allowed_regions: vec![RegionCode::EU],
            created_at: Timestamp::from_millis(1),
        }
    }

    fn application(job_id: JobId) -> ApplicationRecord {
        ApplicationRecord {
            id: ApplicationId::new(),
            job_id,
            applicant_nullifier: Nullifier::new("ab".repeat(32)).unwrap(),
            proof_ok: true,
            created_at: Timestamp::from_millis(2),
            status: ApplicationStatus::Pending,
            reviewed_at: None,
            reviewer_note: None,
        }
    }

    #[test]
    fn empty_backend_lists_empty() {
        let backend = backend();
        assert!(JobRepo::new(backend.clone()).list().is_empty());
        assert!(ApplicationRepo::new(backend).list().is_empty());
    }

    #[test]
    fn corrupted_collection_reads_as_empty() {
        let backend = backend();
        backend.put(JOBS_KEY, "{not json").unwrap();
        assert!(JobRepo::new(backend).list().is_empty());
    }

    #[test]
    fn create_persists_and_lists() {
        let backend = backend();
        let repo = JobRepo::new(backend);
        let created = repo.create(job()).unwrap();
        let listed = repo.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
        assert_eq!(repo.find_by_id(&created.id), Some(created));
    }

    #[test]
    fn list_is_idempotent_between_writes() {
        let backend = backend();
        let repo = JobRepo::new(backend);
        repo.create(job()).unwrap();
        repo.create(job()).unwrap();
        assert_eq!(repo.list(), repo.list());
    }

    #[test]
    fn find_by_job_id_filters() {
        let backend = backend();
        let repo = ApplicationRepo::new(backend);
        let target = JobId::new();
        repo.create(application(target)).unwrap();
        repo.create(application(JobId::new())).unwrap();
        assert_eq!(repo.find_by_job_id(&target).len(), 1);
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let backend = backend();
        let repo = ApplicationRepo::new(backend);
        let err = repo.update(application(JobId::new())).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "application", .. }));
    }

    #[test]
    fn legacy_records_without_status_backfill_to_pending() {
        let backend = backend();
        let raw = serde_json::json!([{
            "id": uuid::Uuid::new_v4(),
            "jobId": uuid::Uuid::new_v4(),
            "applicantNullifier": "cd".repeat(32),
            "proofOk": false,
            "createdAt": 1_700_000_000_000_i64
        }]);
        backend.put(APPLICATIONS_KEY, &raw.to_string()).unwrap();
        let listed = ApplicationRepo::new(backend).list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, ApplicationStatus::Pending);
    }
}
