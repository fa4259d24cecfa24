//! # Field Validation and the Skill Allowlist
//!
//! Rejects malformed job policies and applicant attribute sets before any
//! hashing or storage occurs. Failures are collected into a field-keyed
//! [`ValidationError`] so every failing field surfaces at once.
//!
//! The skill allowlist is external configuration shared by validation and
//! the CLI: any skill tag not on the list is rejected. A built-in default
//! list ships with the crate; deployments load their own from a JSON file
//! of the form `{"skills": ["Rust", ...]}`.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::{FieldErrors, ValidationError};
use crate::policy::{ApplicantAttributes, JobPolicyInput};

/// Policy constraints, shared with the UI layer for form hints.
pub mod limits {
    /// Minimum job title length.
    pub const TITLE_MIN: usize = 3;
    /// Maximum job title length.
    pub const TITLE_MAX: usize = 80;
    /// Minimum company name length.
    pub const COMPANY_MIN: usize = 2;
    /// Maximum company name length.
    pub const COMPANY_MAX: usize = 60;
    /// Maximum required skills on a policy.
    pub const POLICY_SKILLS_MAX: usize = 5;
    /// Maximum skills on an applicant profile.
    pub const APPLICANT_SKILLS_MAX: usize = 10;
    /// Maximum allowed regions on a policy.
    pub const REGIONS_MAX: usize = 5;
    /// Maximum experience years.
    pub const EXPERIENCE_MAX: u8 = 40;
    /// Maximum reviewer-note length.
    pub const REVIEWER_NOTE_MAX: usize = 500;
}

/// Errors loading an allowlist configuration file.
#[derive(Error, Debug)]
pub enum AllowlistError {
    /// The file could not be read.
    #[error("failed to read allowlist file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid allowlist JSON.
    #[error("failed to parse allowlist file: {0}")]
    Json(#[from] serde_json::Error),

    /// The file parsed but contains no skills.
    #[error("allowlist file contains no skills")]
    Empty,
}

#[derive(Deserialize)]
struct AllowlistFile {
    skills: Vec<String>,
}

/// The fixed set of permissible skill tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillAllowlist {
    skills: BTreeSet<String>,
}

impl SkillAllowlist {
    /// Build an allowlist from an explicit set of tags.
    pub fn from_skills(skills: impl IntoIterator<Item = String>) -> Self {
        Self {
            skills: skills.into_iter().collect(),
        }
    }

    /// Load an allowlist from a JSON file of the form `{"skills": [...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, AllowlistError> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: AllowlistFile = serde_json::from_str(&raw)?;
        if parsed.skills.is_empty() {
            return Err(AllowlistError::Empty);
        }
        Ok(Self::from_skills(parsed.skills))
    }

    /// Whether a skill tag is permitted.
    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Iterate the permitted tags in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    /// Number of permitted tags.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the allowlist is empty.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl Default for SkillAllowlist {
    /// The built-in default allowlist.
    fn default() -> Self {
        Self::from_skills(
            [
                "Rust",
                "TypeScript",
                "JavaScript",
                "Go",
                "Python",
                "Java",
                "C++",
                "Solidity",
                "React",
                "Node.js",
                "SQL",
                "GraphQL",
                "Docker",
                "Kubernetes",
                "AWS",
                "Terraform",
            ]
            .into_iter()
            .map(String::from),
        )
    }
}

/// Collector that accumulates messages per field.
#[derive(Default)]
struct Collector {
    fields: FieldErrors,
}

impl Collector {
    fn push(&mut self, field: &str, message: String) {
        self.fields.entry(field.to_string()).or_default().push(message);
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.fields))
        }
    }
}

fn check_skills(
    collector: &mut Collector,
    field: &str,
    skills: &[String],
    max: usize,
    allowlist: &SkillAllowlist,
) {
    if skills.is_empty() {
        collector.push(field, "at least one skill is required".to_string());
    }
    if skills.len() > max {
        collector.push(field, format!("at most {max} skills allowed, got {}", skills.len()));
    }
    for skill in skills {
        if !allowlist.contains(skill) {
            collector.push(field, format!("skill not in allowlist: {skill:?}"));
        }
    }
}

/// Validate a job policy form input against the allowlist.
///
/// Checks: title 3–80 chars, company 2–60 chars, 1–5 allowlisted required
/// skills, experience in [0, 40], 1–5 allowed regions.
pub fn validate_job_policy(
    input: &JobPolicyInput,
    allowlist: &SkillAllowlist,
) -> Result<(), ValidationError> {
    let mut c = Collector::default();

    let title_len = input.title.chars().count();
    if !(limits::TITLE_MIN..=limits::TITLE_MAX).contains(&title_len) {
        c.push(
            "title",
            format!(
                "length must be {}-{} characters, got {title_len}",
                limits::TITLE_MIN,
                limits::TITLE_MAX
            ),
        );
    }

    let company_len = input.company.chars().count();
    if !(limits::COMPANY_MIN..=limits::COMPANY_MAX).contains(&company_len) {
        c.push(
            "company",
            format!(
                "length must be {}-{} characters, got {company_len}",
                limits::COMPANY_MIN,
                limits::COMPANY_MAX
            ),
        );
    }

    check_skills(
        &mut c,
        "requiredSkills",
        &input.required_skills,
        limits::POLICY_SKILLS_MAX,
        allowlist,
    );

    if input.min_experience_years > limits::EXPERIENCE_MAX {
        c.push(
            "minExperienceYears",
            format!(
                "must be at most {}, got {}",
                limits::EXPERIENCE_MAX,
                input.min_experience_years
            ),
        );
    }

    if input.allowed_regions.is_empty() {
        c.push("allowedRegions", "at least one region is required".to_string());
    }
    if input.allowed_regions.len() > limits::REGIONS_MAX {
        c.push(
            "allowedRegions",
            format!(
                "at most {} regions allowed, got {}",
                limits::REGIONS_MAX,
                input.allowed_regions.len()
            ),
        );
    }

    c.finish()
}

/// Validate applicant attributes against the allowlist.
///
/// Checks: 1–10 allowlisted skills, experience in [0, 40], secret exactly
/// 64 lowercase hex characters. Region codes are valid by construction of
/// [`crate::RegionCode`].
pub fn validate_applicant_attributes(
    attrs: &ApplicantAttributes,
    allowlist: &SkillAllowlist,
) -> Result<(), ValidationError> {
    let mut c = Collector::default();

    check_skills(
        &mut c,
        "skills",
        &attrs.skills,
        limits::APPLICANT_SKILLS_MAX,
        allowlist,
    );

    if attrs.experience_years > limits::EXPERIENCE_MAX {
        c.push(
            "experienceYears",
            format!(
                "must be at most {}, got {}",
                limits::EXPERIENCE_MAX,
                attrs.experience_years
            ),
        );
    }

    let secret = attrs.secret.expose();
    if secret.len() != 64
        || !secret
            .chars()
            .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch))
    {
        c.push("secret", "must be exactly 64 lowercase hex characters".to_string());
    }

    c.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ApplicantSecret;
    use crate::region::RegionCode;

    fn valid_policy_input() -> JobPolicyInput {
        JobPolicyInput {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            required_skills: vec!["Rust".to_string()],
            min_experience_years: 2,
            allowed_regions: vec![RegionCode::EU],
        }
    }

    fn valid_attrs() -> ApplicantAttributes {
        ApplicantAttributes {
            skills: vec!["Rust".to_string(), "Go".to_string()],
            experience_years: 5,
            region: RegionCode::EU,
            secret: ApplicantSecret::generate(),
        }
    }

    #[test]
    fn valid_policy_passes() {
        assert!(validate_job_policy(&valid_policy_input(), &SkillAllowlist::default()).is_ok());
    }

    #[test]
    fn short_title_rejected() {
        let mut input = valid_policy_input();
        input.title = "ab".to_string();
        let err = validate_job_policy(&input, &SkillAllowlist::default()).unwrap_err();
        assert!(err.fields.contains_key("title"));
    }

    #[test]
    fn long_company_rejected() {
        let mut input = valid_policy_input();
        input.company = "x".repeat(61);
        let err = validate_job_policy(&input, &SkillAllowlist::default()).unwrap_err();
        assert!(err.fields.contains_key("company"));
    }

    #[test]
    fn unlisted_skill_rejected() {
        let mut input = valid_policy_input();
        input.required_skills = vec!["Underwater Basket Weaving".to_string()];
        let err = validate_job_policy(&input, &SkillAllowlist::default()).unwrap_err();
        let msgs = &err.fields["requiredSkills"];
        assert!(msgs[0].contains("not in allowlist"));
    }

    #[test]
    fn empty_and_oversized_skill_lists_rejected() {
        let mut input = valid_policy_input();
        input.required_skills = vec![];
        let err = validate_job_policy(&input, &SkillAllowlist::default()).unwrap_err();
        assert!(err.fields.contains_key("requiredSkills"));

        input.required_skills = vec!["Rust".to_string(); 6];
        let err = validate_job_policy(&input, &SkillAllowlist::default()).unwrap_err();
        assert!(err.fields["requiredSkills"][0].contains("at most 5"));
    }

    #[test]
    fn experience_over_forty_rejected() {
        let mut input = valid_policy_input();
        input.min_experience_years = 41;
        let err = validate_job_policy(&input, &SkillAllowlist::default()).unwrap_err();
        assert!(err.fields.contains_key("minExperienceYears"));
    }

    #[test]
    fn empty_regions_rejected() {
        let mut input = valid_policy_input();
        input.allowed_regions = vec![];
        let err = validate_job_policy(&input, &SkillAllowlist::default()).unwrap_err();
        assert!(err.fields.contains_key("allowedRegions"));
    }

    #[test]
    fn multiple_failures_reported_together() {
        let input = JobPolicyInput {
            title: "x".to_string(),
            company: "y".to_string(),
            required_skills: vec![],
            min_experience_years: 99,
            allowed_regions: vec![],
        };
        let err = validate_job_policy(&input, &SkillAllowlist::default()).unwrap_err();
        assert_eq!(err.fields.len(), 5);
    }

    #[test]
    fn valid_attributes_pass() {
        assert!(validate_applicant_attributes(&valid_attrs(), &SkillAllowlist::default()).is_ok());
    }

    #[test]
    fn applicant_allows_up_to_ten_skills() {
        let allowlist = SkillAllowlist::default();
        let mut attrs = valid_attrs();
        attrs.skills = allowlist.iter().take(10).map(String::from).collect();
        assert!(validate_applicant_attributes(&attrs, &allowlist).is_ok());

        attrs.skills.push("Rust".to_string());
        let err = validate_applicant_attributes(&attrs, &allowlist).unwrap_err();
        assert!(err.fields["skills"][0].contains("at most 10"));
    }

    #[test]
    fn allowlist_file_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join("zkjb-allowlist-test.json");
        std::fs::write(&path, r#"{"skills": ["Rust", "OCaml"]}"#).unwrap();
        let list = SkillAllowlist::from_json_file(&path).unwrap();
        assert!(list.contains("OCaml"));
        assert!(!list.contains("COBOL"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_allowlist_file_rejected() {
        let dir = std::env::temp_dir();
        let path = dir.join("zkjb-allowlist-empty.json");
        std::fs::write(&path, r#"{"skills": []}"#).unwrap();
        assert!(matches!(
            SkillAllowlist::from_json_file(&path),
            Err(AllowlistError::Empty)
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn default_allowlist_contains_common_tags() {
        let list = SkillAllowlist::default();
        assert!(list.contains("Rust"));
        assert!(list.contains("TypeScript"));
        assert!(list.contains("Go"));
    }
}
