//! # Policy Hashing and Nullifier Derivation
//!
//! The two pure fingerprint functions underpinning the proof flow.
//!
//! - [`policy_hash`] digests a policy's eligibility criteria. List fields
//!   are sorted before canonicalization, so the hash is invariant to input
//!   ordering; any change to the criteria changes the hash.
//! - [`derive_nullifier`] fingerprints one (job, secret) pair. It is the
//!   sole rate-limiting mechanism — one nullifier per (job, secret),
//!   enforced by uniqueness checks downstream. It is NOT a cryptographic
//!   commitment scheme, merely a deterministic fingerprint.

use serde::Serialize;

use zkjb_core::{
    sha256_digest, ApplicantSecret, CanonicalBytes, ContentDigest, JobId, JobPolicy, Nullifier,
    RegionCode, Sha256Accumulator,
};

use crate::traits::ProofError;

/// The normalized subset of a policy that the hash covers. Title, company,
/// and timestamps are presentation data and excluded.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NormalizedPolicy<'a> {
    required_skills: Vec<&'a str>,
    min_experience_years: u8,
    allowed_regions: Vec<RegionCode>,
}

/// Compute the deterministic digest of a policy's eligibility criteria.
///
/// `required_skills` and `allowed_regions` are sorted lexicographically
/// before serialization, so two policies with the same content in different
/// order hash identically.
pub fn policy_hash(policy: &JobPolicy) -> Result<ContentDigest, ProofError> {
    let mut skills: Vec<&str> = policy.required_skills.iter().map(String::as_str).collect();
    skills.sort_unstable();

    let mut regions = policy.allowed_regions.clone();
    regions.sort_unstable();

    let normalized = NormalizedPolicy {
        required_skills: skills,
        min_experience_years: policy.min_experience_years,
        allowed_regions: regions,
    };

    let canonical = CanonicalBytes::new(&normalized)?;
    Ok(sha256_digest(&canonical))
}

/// Derive the nullifier for one (job, secret) pair.
///
/// Hashes `"{job_id}||{secret}"` — the `||` separator keeps the preimage
/// unambiguous. Identical inputs always yield the identical nullifier;
/// a different secret or a different job yields a different one.
pub fn derive_nullifier(job_id: &JobId, secret: &ApplicantSecret) -> Nullifier {
    let mut acc = Sha256Accumulator::new();
    acc.update(job_id.to_string().as_bytes());
    acc.update(b"||");
    acc.update(secret.expose().as_bytes());
    // A SHA-256 hex digest always satisfies the Nullifier shape.
    Nullifier::new(acc.finalize_hex())
        .unwrap_or_else(|_| unreachable!("sha256 hex is 64 lowercase hex chars"))
}
