//! # Config Subcommand
//!
//! Shows the active proof adapter configuration and the skill allowlist.
//! Secrets are redacted to presence flags before anything is printed.

use anyhow::Result;
use clap::Args;

use crate::{print_json, CliContext};

/// Arguments for `zkjb config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also list the accepted skill tags.
    #[arg(long)]
    pub skills: bool,
}

/// Run `zkjb config`.
pub fn run_config(args: &ConfigArgs, ctx: &CliContext) -> Result<u8> {
    let status = ctx.adapter.config_status();
    if args.skills {
        let skills: Vec<&str> = ctx.allowlist.iter().collect();
        print_json(&serde_json::json!({
            "adapter": status,
            "allowedSkills": skills,
        }))?;
    } else {
        print_json(&status)?;
    }
    Ok(0)
}
