#![deny(missing_docs)]

//! # zkjb-proof — Simulated Zero-Knowledge Layer
//!
//! Provides a trait-based proof-provider abstraction with two
//! implementations: a deterministic mock (SHA-256 digests with a simulated
//! delay) and a network-backed stub with the same signatures.
//!
//! ## Architecture
//!
//! - **Hashing** ([`hash`]): `policy_hash()` and `derive_nullifier()` — the
//!   two deterministic fingerprints the whole flow rests on.
//! - **Traits** ([`traits`]): the [`ProofProvider`] trait is the
//!   compile-time contract that keeps mock and network implementations
//!   interchangeable at call sites.
//! - **Mock** ([`mock`]): [`MockProofProvider`] simulates proof generation
//!   and verification with fixed delays. Transparent and deterministic —
//!   **no zero-knowledge privacy**; it exists so the application flow can
//!   be exercised end to end without a proving backend.
//! - **Network** ([`network`]): [`NetworkProofProvider`] speaks HTTP to an
//!   external prover/verifier. Non-functional without a live endpoint;
//!   every failure maps to an error the adapter can fall back from.
//! - **Adapter** ([`adapter`]): [`ProofAdapter`] selects the provider once
//!   at startup from configuration and handles network-to-mock fallback,
//!   replacing scattered runtime conditionals.

pub mod adapter;
pub mod hash;
pub mod mock;
pub mod network;
pub mod traits;

pub use adapter::{AdapterMode, ConfigStatus, ProofAdapter, ProofConfig};
pub use hash::{derive_nullifier, policy_hash};
pub use mock::{MockDelays, MockProofProvider};
pub use network::{NetworkConfig, NetworkProofProvider};
pub use traits::{ProofBackend, ProofBundle, ProofError, ProofProvider, ProofToken, PublicInputs, SubmitReceipt};
