//! # Proof Adapter
//!
//! Routes proof generation, verification, and submission to either the
//! mock provider or the network-backed stub. The provider is selected once
//! at construction from [`ProofConfig`] — call sites never branch on
//! configuration flags.
//!
//! ## Fallback
//!
//! On the network path, any failure falls back to the mock path; for
//! verification, to local verification when the private attributes are
//! available, and to a well-formedness check otherwise. The adapter
//! contains no business logic of its own — duplicate detection is the
//! state store's single authority.

use serde::Serialize;

use zkjb_core::{ApplicantAttributes, JobPolicy};

use crate::mock::MockProofProvider;
use crate::network::{NetworkConfig, NetworkProofProvider};
use crate::traits::{ProofBundle, ProofError, ProofProvider, SubmitReceipt};

/// Which path the adapter routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdapterMode {
    /// Local deterministic mock.
    Mock,
    /// External network prover/verifier.
    Network,
}

impl std::fmt::Display for AdapterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AdapterMode::Mock => "MOCK",
            AdapterMode::Network => "NETWORK",
        })
    }
}

/// Environment-style configuration consumed once at boot.
#[derive(Debug, Clone, Default)]
pub struct ProofConfig {
    /// Whether the network path is requested.
    pub network_enabled: bool,
    /// Network settings; required for the network path to activate.
    pub network: Option<NetworkConfig>,
}

impl ProofConfig {
    /// Configuration for the pure-mock path.
    pub fn mock() -> Self {
        Self::default()
    }

    /// Configuration for the network path.
    pub fn network(config: NetworkConfig) -> Self {
        Self {
            network_enabled: true,
            network: Some(config),
        }
    }

    /// Read configuration from `ZKJB_*` environment variables.
    ///
    /// `ZKJB_NETWORK_ENABLED=true` activates the network path, which also
    /// needs a parseable `ZKJB_RPC_URL` and a `ZKJB_NETWORK_ID`; otherwise
    /// the adapter stays in mock mode and logs why. Optional:
    /// `ZKJB_VERIFIER_ADDRESS`, `ZKJB_API_KEY`, `ZKJB_PROOF_SERVER_URL`.
    pub fn from_env() -> Self {
        let enabled = std::env::var("ZKJB_NETWORK_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if !enabled {
            return Self::mock();
        }

        let rpc_url = std::env::var("ZKJB_RPC_URL")
            .ok()
            .and_then(|v| url::Url::parse(&v).ok());
        let network_id = std::env::var("ZKJB_NETWORK_ID").ok();

        match (rpc_url, network_id) {
            (Some(rpc_url), Some(network_id)) => Self {
                network_enabled: true,
                network: Some(NetworkConfig {
                    rpc_url,
                    network_id,
                    verifier_address: std::env::var("ZKJB_VERIFIER_ADDRESS").ok(),
                    api_key: std::env::var("ZKJB_API_KEY").ok(),
                    proof_server_url: std::env::var("ZKJB_PROOF_SERVER_URL")
                        .ok()
                        .and_then(|v| url::Url::parse(&v).ok()),
                }),
            },
            _ => {
                tracing::warn!(
                    "ZKJB_NETWORK_ENABLED is set but ZKJB_RPC_URL/ZKJB_NETWORK_ID are missing \
                     or invalid; staying in mock mode"
                );
                Self {
                    network_enabled: true,
                    network: None,
                }
            }
        }
    }
}

/// Observability snapshot of the adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigStatus {
    /// Active routing mode.
    pub mode: AdapterMode,
    /// Whether the network path was requested.
    pub network_enabled: bool,
    /// Configured RPC endpoint, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    /// Configured network identifier, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    /// Configured verifier address, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifier_address: Option<String>,
    /// Whether an API key is configured. The key itself is never exposed.
    pub api_key_set: bool,
}

/// Routes proof operations to the selected provider, with network-to-mock
/// fallback.
pub struct ProofAdapter {
    mock: MockProofProvider,
    network: Option<NetworkProofProvider>,
    network_enabled: bool,
}

impl ProofAdapter {
    /// Build an adapter from configuration. Selection happens here, once.
    pub fn from_config(config: ProofConfig) -> Self {
        let network = config.network.map(NetworkProofProvider::new);
        let adapter = Self {
            mock: MockProofProvider::new(),
            network,
            network_enabled: config.network_enabled,
        };
        tracing::info!(mode = %adapter.mode(), "proof adapter initialized");
        adapter
    }

    /// Build a mock-only adapter with explicit mock delays (tests, CLI).
    pub fn mock_with(mock: MockProofProvider) -> Self {
        Self {
            mock,
            network: None,
            network_enabled: false,
        }
    }

    /// The active routing mode.
    pub fn mode(&self) -> AdapterMode {
        if self.network.is_some() {
            AdapterMode::Network
        } else {
            AdapterMode::Mock
        }
    }

    /// Snapshot the configuration for observability.
    pub fn config_status(&self) -> ConfigStatus {
        let network = self.network.as_ref().map(NetworkProofProvider::config);
        ConfigStatus {
            mode: self.mode(),
            network_enabled: self.network_enabled,
            rpc_url: network.map(|c| c.rpc_url.to_string()),
            network_id: network.map(|c| c.network_id.clone()),
            verifier_address: network.and_then(|c| c.verifier_address.clone()),
            api_key_set: network.is_some_and(|c| c.api_key.is_some()),
        }
    }

    /// Generate a proof bundle, falling back to the mock on network failure.
    pub async fn generate(
        &self,
        attrs: &ApplicantAttributes,
        policy: &JobPolicy,
    ) -> Result<ProofBundle, ProofError> {
        if let Some(network) = &self.network {
            match network.generate(attrs, policy).await {
                Ok(bundle) => return Ok(bundle),
                Err(e) => {
                    tracing::warn!(error = %e, "network proof generation failed; falling back to mock");
                }
            }
        }
        self.mock.generate(attrs, policy).await
    }

    /// Verify a bundle.
    ///
    /// With attributes: full local verification is available as the
    /// fallback. Without: only well-formedness can be confirmed.
    pub async fn verify(
        &self,
        bundle: &ProofBundle,
        policy: &JobPolicy,
        attrs: Option<&ApplicantAttributes>,
    ) -> Result<bool, ProofError> {
        if let Some(network) = &self.network {
            match network.verify_public_only(bundle, policy).await {
                Ok(valid) => return Ok(valid),
                Err(e) => {
                    tracing::warn!(error = %e, "network verification failed");
                    return match attrs {
                        Some(attrs) => self.mock.verify(bundle, policy, attrs).await,
                        None => Ok(false),
                    };
                }
            }
        }

        match attrs {
            Some(attrs) => self.mock.verify(bundle, policy, attrs).await,
            None => {
                tracing::warn!("verification without attributes confirms well-formedness only");
                self.mock.verify_public_only(bundle, policy).await
            }
        }
    }

    /// Submit a bundle, falling back to the mock on network failure.
    pub async fn submit(
        &self,
        bundle: &ProofBundle,
        policy: &JobPolicy,
    ) -> Result<SubmitReceipt, ProofError> {
        if let Some(network) = &self.network {
            match network.submit(bundle, policy).await {
                Ok(receipt) => return Ok(receipt),
                Err(e) => {
                    tracing::warn!(error = %e, "network submission failed; falling back to mock");
                }
            }
        }
        self.mock.submit(bundle, policy).await
    }
}
