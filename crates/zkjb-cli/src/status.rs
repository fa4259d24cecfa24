//! # Status Subcommand
//!
//! Application overview for the board or for one job: counts per status
//! plus the records themselves.

use anyhow::Result;
use clap::{Args, ValueEnum};

use zkjb_core::{ApplicationRecord, ApplicationStatus, JobId};

use crate::{print_json, CliContext};

/// Status filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    /// Awaiting review.
    Pending,
    /// Approved by a reviewer.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
}

impl From<StatusFilter> for ApplicationStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Pending => ApplicationStatus::Pending,
            StatusFilter::Approved => ApplicationStatus::Approved,
            StatusFilter::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// Arguments for `zkjb status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Restrict to one job.
    #[arg(long)]
    pub job_id: Option<String>,

    /// Restrict to one review status.
    #[arg(long, value_enum)]
    pub status: Option<StatusFilter>,
}

fn count(records: &[ApplicationRecord], status: ApplicationStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

/// Run `zkjb status`.
pub fn run_status(args: &StatusArgs, ctx: &CliContext) -> Result<u8> {
    let mut records = match &args.job_id {
        Some(raw) => ctx.store.applications_for_job(&JobId::parse(raw)?),
        None => ctx.store.applications(),
    };
    if let Some(filter) = args.status {
        let status = ApplicationStatus::from(filter);
        records.retain(|r| r.status == status);
    }

    print_json(&serde_json::json!({
        "counts": {
            "total": records.len(),
            "pending": count(&records, ApplicationStatus::Pending),
            "approved": count(&records, ApplicationStatus::Approved),
            "rejected": count(&records, ApplicationStatus::Rejected),
        },
        "applications": records,
    }))?;
    Ok(0)
}
