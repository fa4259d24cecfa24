//! # Review Subcommand
//!
//! Employer-side review of pending applications. The transition rules and
//! the proof requirement live in the state store; this module only shapes
//! the decision.

use anyhow::Result;
use clap::{Args, ValueEnum};

use zkjb_core::{ApplicationId, ApplicationStatus, ReviewDecision};

use crate::{print_json, CliContext};

/// The reviewer's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verdict {
    /// Approve the application.
    Approve,
    /// Reject the application.
    Reject,
}

impl Verdict {
    fn status(self) -> ApplicationStatus {
        match self {
            Verdict::Approve => ApplicationStatus::Approved,
            Verdict::Reject => ApplicationStatus::Rejected,
        }
    }
}

/// Arguments for `zkjb review`.
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Application identifier.
    #[arg(long)]
    pub application_id: String,

    /// Approve or reject.
    #[arg(long, value_enum)]
    pub verdict: Verdict,

    /// Optional reviewer note, at most 500 characters.
    #[arg(long)]
    pub note: Option<String>,
}

/// Run `zkjb review`.
pub fn run_review(args: &ReviewArgs, ctx: &CliContext) -> Result<u8> {
    let decision = ReviewDecision {
        application_id: ApplicationId::parse(&args.application_id)?,
        status: args.verdict.status(),
        note: args.note.clone(),
    };
    let reviewed = ctx.store.review(&decision)?;
    print_json(&reviewed)?;
    Ok(0)
}
