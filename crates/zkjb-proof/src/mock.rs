//! # Mock Proof Provider
//!
//! A deterministic, transparent proof provider simulating the asynchronous
//! shape of a real proving backend. Proof tokens are SHA-256 digests of the
//! full (attributes, policy, public inputs) tuple; generation and
//! verification sleep for a fixed simulated delay before returning.
//!
//! ## Security Notice
//!
//! **NOT PRIVATE.** The token is a transparent hash anyone can recompute
//! from the same inputs. It exists so the application flow — generate,
//! check, verify, persist — can be exercised end to end without a proving
//! backend.
//!
//! ## Verification
//!
//! `verify()` runs the ordered eligibility checks directly against the
//! attributes. The first failing check is logged via `tracing` and yields
//! `Ok(false)` — a policy mismatch is an expected business outcome, never
//! an error.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use zkjb_core::{sha256_digest, ApplicantAttributes, CanonicalBytes, JobPolicy, Timestamp};

use crate::hash::{derive_nullifier, policy_hash};
use crate::traits::{
    ProofBackend, ProofBundle, ProofError, ProofProvider, ProofToken, PublicInputs, SubmitReceipt,
};

/// Simulated proving delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDelays {
    /// Delay before `generate` returns.
    pub generate: Duration,
    /// Delay before `verify` returns.
    pub verify: Duration,
    /// Delay before `verify_public_only` returns.
    pub verify_public: Duration,
}

impl Default for MockDelays {
    fn default() -> Self {
        Self {
            generate: Duration::from_millis(500),
            verify: Duration::from_millis(200),
            verify_public: Duration::from_millis(100),
        }
    }
}

impl MockDelays {
    /// Zero delays, for tests.
    pub fn none() -> Self {
        Self {
            generate: Duration::ZERO,
            verify: Duration::ZERO,
            verify_public: Duration::ZERO,
        }
    }
}

/// The deterministic mock proof provider.
#[derive(Debug, Clone, Default)]
pub struct MockProofProvider {
    delays: MockDelays,
}

impl MockProofProvider {
    /// Create a provider with the standard simulated delays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with explicit delays.
    pub fn with_delays(delays: MockDelays) -> Self {
        Self { delays }
    }

    /// Compute the token digest over the full generation input.
    ///
    /// The attribute fields (secret included) are assembled into a
    /// transient JSON value here rather than via `Serialize` — attributes
    /// deliberately have no `Serialize` impl so they can never reach a
    /// persisted store.
    fn token_digest(
        attrs: &ApplicantAttributes,
        policy: &JobPolicy,
        public_inputs: &PublicInputs,
    ) -> Result<zkjb_core::ContentDigest, ProofError> {
        let input = json!({
            "attrs": {
                "skills": attrs.skills,
                "experienceYears": attrs.experience_years,
                "region": attrs.region,
                "secret": attrs.secret.expose(),
            },
            "policy": policy,
            "publicInputs": public_inputs,
        });
        let canonical = CanonicalBytes::new(&input)?;
        Ok(sha256_digest(&canonical))
    }
}

#[async_trait]
impl ProofProvider for MockProofProvider {
    fn backend(&self) -> ProofBackend {
        ProofBackend::Mock
    }

    async fn generate(
        &self,
        attrs: &ApplicantAttributes,
        policy: &JobPolicy,
    ) -> Result<ProofBundle, ProofError> {
        tokio::time::sleep(self.delays.generate).await;

        let public_inputs = PublicInputs {
            job_id: policy.id,
            policy_hash: policy_hash(policy)?,
            nullifier: derive_nullifier(&policy.id, &attrs.secret),
        };

        let digest = Self::token_digest(attrs, policy, &public_inputs)?;

        Ok(ProofBundle {
            proof: ProofToken {
                backend: ProofBackend::Mock,
                generated_at: Timestamp::now(),
                digest,
            },
            public_inputs,
        })
    }

    async fn verify(
        &self,
        bundle: &ProofBundle,
        policy: &JobPolicy,
        attrs: &ApplicantAttributes,
    ) -> Result<bool, ProofError> {
        tokio::time::sleep(self.delays.verify).await;

        if bundle.public_inputs.job_id != policy.id {
            tracing::warn!(job_id = %policy.id, "verify failed: job id mismatch");
            return Ok(false);
        }

        if bundle.public_inputs.policy_hash != policy_hash(policy)? {
            tracing::warn!(job_id = %policy.id, "verify failed: policy hash mismatch");
            return Ok(false);
        }

        let expected_nullifier = derive_nullifier(&policy.id, &attrs.secret);
        if bundle.public_inputs.nullifier != expected_nullifier {
            tracing::warn!(job_id = %policy.id, "verify failed: nullifier mismatch");
            return Ok(false);
        }

        let has_all_skills = policy
            .required_skills
            .iter()
            .all(|skill| attrs.skills.contains(skill));
        if !has_all_skills {
            tracing::info!(job_id = %policy.id, "verify failed: missing required skills");
            return Ok(false);
        }

        if attrs.experience_years < policy.min_experience_years {
            tracing::info!(job_id = %policy.id, "verify failed: insufficient experience");
            return Ok(false);
        }

        if !policy.allowed_regions.contains(&attrs.region) {
            tracing::info!(job_id = %policy.id, "verify failed: region not allowed");
            return Ok(false);
        }

        Ok(true)
    }

    async fn verify_public_only(
        &self,
        bundle: &ProofBundle,
        policy: &JobPolicy,
    ) -> Result<bool, ProofError> {
        tokio::time::sleep(self.delays.verify_public).await;

        Ok(bundle.public_inputs.job_id == policy.id
            && bundle.public_inputs.policy_hash == policy_hash(policy)?
            && bundle.public_inputs.nullifier.as_str().len() == 64)
    }

    async fn submit(
        &self,
        bundle: &ProofBundle,
        policy: &JobPolicy,
    ) -> Result<SubmitReceipt, ProofError> {
        if !self.verify_public_only(bundle, policy).await? {
            return Err(ProofError::InvalidBundle(
                "public inputs do not match the policy".to_string(),
            ));
        }
        Ok(SubmitReceipt::accepted_for(bundle, None))
    }
}
