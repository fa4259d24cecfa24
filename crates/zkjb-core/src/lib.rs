#![deny(missing_docs)]

//! # zkjb-core — Foundational Types for the zkjb Job Board
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, `chrono`, `uuid`, `sha2`, `rand_core`, and `zeroize` from
//! the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`JobId`] where an [`ApplicationId`]
//!    is expected, and a [`Nullifier`] is not interchangeable with an
//!    arbitrary string.
//!
//! 2. **[`CanonicalBytes`] is the sole path to digest computation.** Policy
//!    hashes and nullifiers flow through `CanonicalBytes::new()`, which
//!    produces sorted-key, compact JSON with float rejection so that the
//!    same logical value always yields the same digest.
//!
//! 3. **Validation is field-keyed.** [`ValidationError`] carries a map from
//!    field name to messages so callers render errors per field instead of
//!    sniffing error shapes.
//!
//! 4. **Ephemeral secrets stay ephemeral.** [`ApplicantSecret`] is zeroized
//!    on drop and redacted in `Debug`; it is never serialized into any
//!    persisted record.

pub mod application;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod policy;
pub mod region;
pub mod temporal;
pub mod validation;

// Re-export primary types at crate root for ergonomic imports.
pub use application::{ApplicationRecord, ApplicationStatus, ReviewDecision};
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_raw, ContentDigest, Sha256Accumulator};
pub use error::{CanonicalizationError, FieldErrors, IdentityError, ValidationError};
pub use identity::{ApplicantSecret, ApplicationId, JobId, Nullifier};
pub use policy::{ApplicantAttributes, JobPolicy, JobPolicyInput, SkillTag};
pub use region::RegionCode;
pub use temporal::Timestamp;
pub use validation::{validate_applicant_attributes, validate_job_policy, SkillAllowlist};
