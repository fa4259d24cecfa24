//! # Job Policies and Applicant Attributes
//!
//! The two sides of the eligibility check: what an employer requires and
//! what an applicant holds.
//!
//! Persisted records serialize with camelCase field names, matching the
//! JSON collections written by earlier versions of the job board, so
//! existing stored data reads back unchanged.
//!
//! [`ApplicantAttributes`] deliberately does **not** implement `Serialize`:
//! it carries the applicant secret and exists only transiently during proof
//! generation. Keeping it unserializable makes "never persisted" a property
//! of the type system rather than a convention.

use serde::{Deserialize, Serialize};

use crate::identity::{ApplicantSecret, JobId};
use crate::region::RegionCode;
use crate::temporal::Timestamp;

/// A skill tag drawn from the configured allowlist.
pub type SkillTag = String;

/// An employer's published job policy: the eligibility criteria applicants
/// prove against. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPolicy {
    /// Unique job identifier, also a public input for proofs.
    pub id: JobId,
    /// Job title, 3–80 characters.
    pub title: String,
    /// Company name, 2–60 characters.
    pub company: String,
    /// Required skills, 1–5 allowlisted tags.
    pub required_skills: Vec<SkillTag>,
    /// Minimum experience in years, 0–40.
    pub min_experience_years: u8,
    /// Regions the employer can hire from, 1–5 codes.
    pub allowed_regions: Vec<RegionCode>,
    /// Creation time, epoch milliseconds.
    pub created_at: Timestamp,
}

impl JobPolicy {
    /// Materialize a policy from validated form input, assigning a fresh
    /// identifier and creation timestamp.
    pub fn from_input(input: JobPolicyInput) -> Self {
        Self {
            id: JobId::new(),
            title: input.title,
            company: input.company,
            required_skills: input.required_skills,
            min_experience_years: input.min_experience_years,
            allowed_regions: input.allowed_regions,
            created_at: Timestamp::now(),
        }
    }
}

/// Form input for a new job policy — everything but the assigned identifier
/// and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPolicyInput {
    /// Job title, 3–80 characters.
    pub title: String,
    /// Company name, 2–60 characters.
    pub company: String,
    /// Required skills, 1–5 allowlisted tags.
    pub required_skills: Vec<SkillTag>,
    /// Minimum experience in years, 0–40.
    pub min_experience_years: u8,
    /// Regions the employer can hire from, 1–5 codes.
    pub allowed_regions: Vec<RegionCode>,
}

/// An applicant's private attributes. Ephemeral: lives only for the
/// duration of proof generation and local verification.
///
/// No `Serialize` impl — this type must never be written to any persisted
/// store.
#[derive(Debug, Clone)]
pub struct ApplicantAttributes {
    /// The applicant's skills, 1–10 allowlisted tags.
    pub skills: Vec<SkillTag>,
    /// Experience in years, 0–40.
    pub experience_years: u8,
    /// The applicant's region.
    pub region: RegionCode,
    /// Client-generated random secret, 64 lowercase hex characters.
    pub secret: ApplicantSecret,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> JobPolicyInput {
        JobPolicyInput {
            title: "Systems Engineer".to_string(),
            company: "Acme".to_string(),
            required_skills: vec!["Rust".to_string(), "TypeScript".to_string()],
            min_experience_years: 3,
            allowed_regions: vec![RegionCode::NA, RegionCode::EU],
        }
    }

    #[test]
    fn from_input_assigns_id_and_timestamp() {
        let a = JobPolicy::from_input(sample_input());
        let b = JobPolicy::from_input(sample_input());
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "Systems Engineer");
        assert!(a.created_at.as_millis() > 0);
    }

    #[test]
    fn policy_serializes_camel_case() {
        let policy = JobPolicy::from_input(sample_input());
        let json = serde_json::to_value(&policy).unwrap();
        assert!(json.get("requiredSkills").is_some());
        assert!(json.get("minExperienceYears").is_some());
        assert!(json.get("allowedRegions").is_some());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn policy_json_roundtrip() {
        let policy = JobPolicy::from_input(sample_input());
        let json = serde_json::to_string(&policy).unwrap();
        let back: JobPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, back);
    }
}
