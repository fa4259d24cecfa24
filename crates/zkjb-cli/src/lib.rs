//! # zkjb-cli — Command-Line Interface for the Job Board Demo
//!
//! Provides the `zkjb` binary. Subcommands mirror the two roles of the demo:
//!
//! - `zkjb job post|list|show` — employer posts and inspects job policies
//! - `zkjb apply` — applicant submits an application with a local proof
//! - `zkjb review` — employer approves or rejects a pending application
//! - `zkjb status` — application overview, optionally per job
//! - `zkjb config` — active proof adapter configuration
//!
//! State lives in a data directory (one JSON file per collection); the proof
//! path is selected once at startup from `ZKJB_*` environment variables.

#![deny(missing_docs)]

pub mod apply;
pub mod config;
pub mod job;
pub mod review;
pub mod status;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use zkjb_core::SkillAllowlist;
use zkjb_proof::{ProofAdapter, ProofConfig};
use zkjb_store::{FileBackend, JobBoardStore};

/// Shared handles every subcommand operates on.
pub struct CliContext {
    /// Jobs and applications over the data directory.
    pub store: JobBoardStore,
    /// Proof generation/verification, mock or network per environment.
    pub adapter: ProofAdapter,
    /// Skill tags accepted by validation.
    pub allowlist: SkillAllowlist,
}

impl CliContext {
    /// Open the store at `data_dir` and build the proof adapter from the
    /// environment. A skills file overrides the built-in allowlist.
    pub fn open(data_dir: &Path, skills_config: Option<&Path>) -> Result<Self> {
        let backend = FileBackend::open(data_dir)
            .with_context(|| format!("opening data directory {}", data_dir.display()))?;
        let allowlist = match skills_config {
            Some(path) => SkillAllowlist::from_json_file(path)
                .with_context(|| format!("loading skill allowlist {}", path.display()))?,
            None => SkillAllowlist::default(),
        };
        Ok(Self {
            store: JobBoardStore::open(Arc::new(backend)),
            adapter: ProofAdapter::from_config(ProofConfig::from_env()),
            allowlist,
        })
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkjb_proof::AdapterMode;

    #[test]
    fn context_opens_fresh_data_dir_in_mock_mode() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = CliContext::open(dir.path(), None).unwrap();
        assert_eq!(ctx.adapter.mode(), AdapterMode::Mock);
        assert!(ctx.store.jobs().is_empty());
        assert!(ctx.allowlist.contains("Rust"));
    }

    #[test]
    fn context_loads_allowlist_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skills.json");
        std::fs::write(&path, r#"{"skills": ["Rust", "OCaml"]}"#).unwrap();
        let ctx = CliContext::open(dir.path(), Some(&path)).unwrap();
        assert!(ctx.allowlist.contains("OCaml"));
        assert!(!ctx.allowlist.contains("Go"));
    }
}
