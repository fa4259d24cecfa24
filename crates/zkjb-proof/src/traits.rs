//! # Proof Provider Trait and Wire Types
//!
//! Defines the abstract interface every proof backend satisfies, plus the
//! bundle types exchanged between applicant and verifier.
//!
//! ## Failure Semantics
//!
//! Eligibility mismatches are **not** errors: `verify` returns `Ok(false)`
//! and the caller routes it to a "did not qualify" outcome. `Err` is
//! reserved for operational failures — canonicalization bugs, network
//! faults — that the adapter may recover from by falling back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use zkjb_core::{
    ApplicantAttributes, CanonicalizationError, ContentDigest, JobId, JobPolicy, Nullifier,
    Timestamp,
};

/// Error during proof generation, verification, or submission.
#[derive(Error, Debug)]
pub enum ProofError {
    /// Digest input could not be canonicalized.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The network backend failed (unreachable, bad response, rejected).
    #[error("network proof backend error: {0}")]
    Network(String),

    /// A bundle failed well-formedness verification at submission.
    #[error("proof bundle rejected: {0}")]
    InvalidBundle(String),
}

/// The backend that produced a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofBackend {
    /// Deterministic SHA-256 mock — no cryptographic meaning.
    Mock,
    /// External network prover/verifier.
    Network,
}

impl ProofBackend {
    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ProofBackend::Mock => "mock-sha256",
            ProofBackend::Network => "network",
        }
    }
}

/// The public inputs of a proof: everything the verifier sees.
///
/// Invariant: `nullifier` uniquely identifies one applicant's one attempt
/// at one job; reuse is rejected downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicInputs {
    /// The job the proof is bound to.
    pub job_id: JobId,
    /// Digest of the policy's normalized eligibility criteria.
    pub policy_hash: ContentDigest,
    /// Fingerprint of the (job, secret) pair.
    pub nullifier: Nullifier,
}

/// The opaque proof token.
///
/// Carries no verifiable cryptographic meaning in the mock backend — it is
/// a re-derivable digest for parity checking only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofToken {
    /// Which backend produced this token.
    pub backend: ProofBackend,
    /// When the token was generated, epoch milliseconds.
    pub generated_at: Timestamp,
    /// The token digest.
    pub digest: ContentDigest,
}

/// A proof token paired with its public inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofBundle {
    /// The opaque proof token.
    pub proof: ProofToken,
    /// The public inputs the token binds to.
    pub public_inputs: PublicInputs,
}

/// Outcome of submitting a proof bundle through a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    /// Whether the submission was accepted.
    pub accepted: bool,
    /// Settlement transaction hash — absent on the mock path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Short reference derived from the nullifier, for display.
    pub application_ref: String,
}

impl SubmitReceipt {
    /// Build an accepted receipt for a bundle, deriving the display
    /// reference from the first 16 nullifier characters.
    pub fn accepted_for(bundle: &ProofBundle, tx_hash: Option<String>) -> Self {
        Self {
            accepted: true,
            tx_hash,
            application_ref: bundle.public_inputs.nullifier.as_str()[..16].to_string(),
        }
    }
}

/// Abstract interface for a proof backend.
///
/// Implementations are interchangeable at call sites; the adapter selects
/// one at startup. `Send + Sync` so a provider can be shared across tasks.
#[async_trait]
pub trait ProofProvider: Send + Sync {
    /// Which backend this provider is.
    fn backend(&self) -> ProofBackend;

    /// Generate a proof bundle for an applicant against a policy.
    async fn generate(
        &self,
        attrs: &ApplicantAttributes,
        policy: &JobPolicy,
    ) -> Result<ProofBundle, ProofError>;

    /// Verify a bundle with access to the private attributes.
    ///
    /// Returns `Ok(false)` on any eligibility or parity mismatch — never an
    /// error for a policy mismatch.
    async fn verify(
        &self,
        bundle: &ProofBundle,
        policy: &JobPolicy,
        attrs: &ApplicantAttributes,
    ) -> Result<bool, ProofError>;

    /// Weaker check usable without the private attributes: confirms the
    /// bundle is well-formed for the policy, modeling what an on-chain
    /// verifier would see without the witness. Cannot confirm eligibility.
    async fn verify_public_only(
        &self,
        bundle: &ProofBundle,
        policy: &JobPolicy,
    ) -> Result<bool, ProofError>;

    /// Submit a bundle for a job.
    async fn submit(
        &self,
        bundle: &ProofBundle,
        policy: &JobPolicy,
    ) -> Result<SubmitReceipt, ProofError>;
}
