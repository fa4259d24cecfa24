//! # Apply Subcommand
//!
//! Applicant-side submission. The private attributes stay in this process:
//! the proof bundle carries only the job id, the policy hash, and the
//! nullifier, and the persisted record carries the eligibility outcome.

use anyhow::{anyhow, bail, Result};
use clap::Args;

use zkjb_core::{
    validate_applicant_attributes, ApplicantAttributes, ApplicantSecret, ApplicationId,
    ApplicationRecord, ApplicationStatus, JobId, RegionCode, Timestamp,
};

use crate::{print_json, CliContext};

/// Arguments for `zkjb apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Job identifier to apply to.
    #[arg(long)]
    pub job_id: String,

    /// Skill tag; repeat for up to 10.
    #[arg(long = "skill", required = true)]
    pub skills: Vec<String>,

    /// Experience in years, 0-40.
    #[arg(long)]
    pub experience: u8,

    /// The applicant's region.
    #[arg(long)]
    pub region: RegionCode,

    /// Applicant secret, 64 lowercase hex characters. Reuse it to apply
    /// with a stable identity; omitted, a fresh one is generated and
    /// printed once.
    #[arg(long)]
    pub secret: Option<String>,
}

/// Run `zkjb apply`.
pub async fn run_apply(args: &ApplyArgs, ctx: &CliContext) -> Result<u8> {
    let job_id = JobId::parse(&args.job_id)?;
    let job = ctx
        .store
        .job(&job_id)
        .ok_or_else(|| anyhow!("job not found: {job_id}"))?;

    let (secret, generated) = match &args.secret {
        Some(hex) => (ApplicantSecret::new(hex.clone())?, false),
        None => (ApplicantSecret::generate(), true),
    };
    if generated {
        // Shown once; the secret is not persisted anywhere.
        eprintln!("generated applicant secret: {}", secret.expose());
    }

    let attrs = ApplicantAttributes {
        skills: args.skills.clone(),
        experience_years: args.experience,
        region: args.region,
        secret,
    };
    if let Err(e) = validate_applicant_attributes(&attrs, &ctx.allowlist) {
        bail!("invalid application: {e}");
    }

    // Fail fast before the (slow) proving step; the store re-checks under
    // its write lock when the record is added.
    let nullifier = zkjb_proof::derive_nullifier(&job_id, &attrs.secret);
    if ctx.store.has_application(&job_id, &nullifier) {
        bail!("an application for this job with this secret already exists");
    }

    let bundle = ctx.adapter.generate(&attrs, &job).await?;
    let proof_ok = ctx.adapter.verify(&bundle, &job, Some(&attrs)).await?;
    let receipt = ctx.adapter.submit(&bundle, &job).await?;

    let record = ctx.store.add_application(ApplicationRecord {
        id: ApplicationId::new(),
        job_id,
        applicant_nullifier: bundle.public_inputs.nullifier.clone(),
        proof_ok,
        created_at: Timestamp::now(),
        status: ApplicationStatus::Pending,
        reviewed_at: None,
        reviewer_note: None,
    })?;

    print_json(&serde_json::json!({
        "application": record,
        "receipt": receipt,
    }))?;
    if !proof_ok {
        tracing::warn!("eligibility check failed; the application cannot be approved");
    }
    Ok(0)
}
