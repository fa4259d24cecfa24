//! # zkjb CLI entry point
//!
//! Parses command-line arguments, sets up tracing from the verbosity flag,
//! opens the shared context, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zkjb_cli::apply::{run_apply, ApplyArgs};
use zkjb_cli::config::{run_config, ConfigArgs};
use zkjb_cli::job::{run_job, JobArgs};
use zkjb_cli::review::{run_review, ReviewArgs};
use zkjb_cli::status::{run_status, StatusArgs};
use zkjb_cli::CliContext;

/// Privacy-preserving job board demo.
///
/// Employers post jobs with eligibility policies; applicants prove they
/// satisfy a policy without revealing their attributes. Proofs are mock by
/// default; set `ZKJB_NETWORK_ENABLED=true` plus `ZKJB_RPC_URL` and
/// `ZKJB_NETWORK_ID` for the network path.
#[derive(Parser, Debug)]
#[command(name = "zkjb", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Data directory for persisted collections.
    #[arg(long, default_value = ".zkjb", global = true)]
    data_dir: PathBuf,

    /// JSON file with the skill allowlist (`{"skills": [...]}`).
    #[arg(long, global = true)]
    skills_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Post, list, and show jobs and their policies.
    Job(JobArgs),

    /// Submit an application to a job.
    Apply(ApplyArgs),

    /// Approve or reject a pending application.
    Review(ReviewArgs),

    /// Application overview, optionally per job.
    Status(StatusArgs),

    /// Show the active proof adapter configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let ctx = match CliContext::open(&cli.data_dir, cli.skills_config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Job(args) => run_job(&args, &ctx),
        Commands::Apply(args) => run_apply(&args, &ctx).await,
        Commands::Review(args) => run_review(&args, &ctx),
        Commands::Status(args) => run_status(&args, &ctx),
        Commands::Config(args) => run_config(&args, &ctx),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
