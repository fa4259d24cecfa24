//! # Job Subcommand
//!
//! Employer-side job management: post a policy, list the board, show one
//! job with its policy hash.

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};

use zkjb_core::{validate_job_policy, JobId, JobPolicy, JobPolicyInput, RegionCode};
use zkjb_proof::policy_hash;

use crate::{print_json, CliContext};

/// Arguments for the `zkjb job` subcommand.
#[derive(Args, Debug)]
pub struct JobArgs {
    /// The job subcommand to run.
    #[command(subcommand)]
    pub command: JobCommand,
}

/// Job subcommands.
#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Post a new job with its eligibility policy.
    Post {
        /// Job title, 3-80 characters.
        #[arg(long)]
        title: String,
        /// Company name, 2-60 characters.
        #[arg(long)]
        company: String,
        /// Required skill tag; repeat for up to 5.
        #[arg(long = "skill", required = true)]
        skills: Vec<String>,
        /// Minimum experience in years, 0-40.
        #[arg(long, default_value_t = 0)]
        min_experience: u8,
        /// Allowed hiring region; repeat for up to 5.
        #[arg(long = "region", required = true)]
        regions: Vec<RegionCode>,
    },

    /// List all posted jobs.
    List,

    /// Show one job and its policy hash.
    Show {
        /// Job identifier.
        #[arg(long)]
        id: String,
    },
}

/// Dispatch `zkjb job`.
pub fn run_job(args: &JobArgs, ctx: &CliContext) -> Result<u8> {
    match &args.command {
        JobCommand::Post {
            title,
            company,
            skills,
            min_experience,
            regions,
        } => {
            let input = JobPolicyInput {
                title: title.clone(),
                company: company.clone(),
                required_skills: skills.clone(),
                min_experience_years: *min_experience,
                allowed_regions: regions.clone(),
            };
            if let Err(e) = validate_job_policy(&input, &ctx.allowlist) {
                bail!("invalid job policy: {e}");
            }
            let job = ctx.store.add_job(JobPolicy::from_input(input))?;
            print_json(&job)?;
            Ok(0)
        }
        JobCommand::List => {
            print_json(&ctx.store.jobs())?;
            Ok(0)
        }
        JobCommand::Show { id } => {
            let id = JobId::parse(id)?;
            let job = ctx
                .store
                .job(&id)
                .ok_or_else(|| anyhow!("job not found: {id}"))?;
            let hash = policy_hash(&job)?;
            print_json(&serde_json::json!({ "job": job, "policyHash": hash }))?;
            Ok(0)
        }
    }
}
