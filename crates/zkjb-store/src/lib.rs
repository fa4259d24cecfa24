//! # zkjb-store
//!
//! Persistence and application state for the job board.
//!
//! - [`backend`]: the key/value [`StorageBackend`] trait with in-memory and
//!   file-backed implementations
//! - [`repo`]: typed repositories over a backend, one JSON collection per key
//! - [`store`]: the [`JobBoardStore`] holding the in-memory working set and
//!   enforcing the review state machine and duplicate-application rules
//!
//! Writes are persist-then-cache: a failed persist leaves the in-memory
//! state untouched.

#![deny(missing_docs)]

pub mod backend;
pub mod error;
pub mod repo;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::StoreError;
pub use repo::{ApplicationRepo, JobRepo, APPLICATIONS_KEY, JOBS_KEY};
pub use store::JobBoardStore;
