//! # Network Proof Provider (Stub)
//!
//! Speaks HTTP to an external prover and on-chain verifier behind the same
//! [`ProofProvider`] signatures as the mock. There is no live deployment of
//! the remote side in this repository — the provider exists so the adapter
//! boundary is swappable without touching callers, and so every failure
//! maps to a [`ProofError::Network`] the adapter can fall back from.
//!
//! Public inputs are computed locally; only the proving step and the
//! verification/submission calls go over the wire. The applicant's secret
//! never leaves the process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use zkjb_core::{ApplicantAttributes, ContentDigest, JobPolicy, Timestamp};

use crate::hash::{derive_nullifier, policy_hash};
use crate::traits::{
    ProofBackend, ProofBundle, ProofError, ProofProvider, ProofToken, PublicInputs, SubmitReceipt,
};

/// Connection settings for the network proof path. All values are inert
/// when the mock path is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Base URL of the network RPC endpoint.
    pub rpc_url: Url,
    /// Network identifier (e.g. a testnet name).
    pub network_id: String,
    /// Address of the deployed verifier contract, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifier_address: Option<String>,
    /// API key for the RPC endpoint, if required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the proof server; defaults to the local proving port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_server_url: Option<Url>,
}

impl NetworkConfig {
    fn proof_server(&self) -> Url {
        self.proof_server_url.clone().unwrap_or_else(|| {
            // Default local proof-server port.
            Url::parse("http://localhost:6300").unwrap_or_else(|_| unreachable!("static URL"))
        })
    }

    fn endpoint(&self, base: &Url, path: &str) -> Result<Url, ProofError> {
        base.join(path)
            .map_err(|e| ProofError::Network(format!("invalid endpoint {path}: {e}")))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProveRequest<'a> {
    network_id: &'a str,
    public_inputs: &'a PublicInputs,
}

#[derive(Deserialize)]
struct ProveResponse {
    proof: ContentDigest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    network_id: &'a str,
    verifier_address: Option<&'a str>,
    bundle: &'a ProofBundle,
}

#[derive(Deserialize)]
struct VerifyResponse {
    valid: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    success: bool,
    tx_hash: Option<String>,
}

/// Proof provider backed by an external network.
#[derive(Debug, Clone)]
pub struct NetworkProofProvider {
    config: NetworkConfig,
    client: reqwest::Client,
}

impl NetworkProofProvider {
    /// Create a provider for the given network configuration.
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// The active network configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    fn request(&self, url: Url) -> reqwest::RequestBuilder {
        let mut req = self.client.post(url);
        if let Some(key) = &self.config.api_key {
            req = req.header("x-api-key", key);
        }
        req
    }

    async fn post_verify(&self, bundle: &ProofBundle) -> Result<bool, ProofError> {
        let url = self.config.endpoint(&self.config.rpc_url, "verify")?;
        let body = VerifyRequest {
            network_id: &self.config.network_id,
            verifier_address: self.config.verifier_address.as_deref(),
            bundle,
        };
        let response = self
            .request(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProofError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProofError::Network(e.to_string()))?;
        let parsed: VerifyResponse = response
            .json()
            .await
            .map_err(|e| ProofError::Network(e.to_string()))?;
        Ok(parsed.valid)
    }
}

#[async_trait]
impl ProofProvider for NetworkProofProvider {
    fn backend(&self) -> ProofBackend {
        ProofBackend::Network
    }

    async fn generate(
        &self,
        attrs: &ApplicantAttributes,
        policy: &JobPolicy,
    ) -> Result<ProofBundle, ProofError> {
        let public_inputs = PublicInputs {
            job_id: policy.id,
            policy_hash: policy_hash(policy)?,
            nullifier: derive_nullifier(&policy.id, &attrs.secret),
        };

        let url = self.config.endpoint(&self.config.proof_server(), "prove")?;
        let body = ProveRequest {
            network_id: &self.config.network_id,
            public_inputs: &public_inputs,
        };

        tracing::debug!(url = %url, "requesting proof from proof server");
        let response = self
            .request(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProofError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProofError::Network(e.to_string()))?;
        let parsed: ProveResponse = response
            .json()
            .await
            .map_err(|e| ProofError::Network(e.to_string()))?;

        Ok(ProofBundle {
            proof: ProofToken {
                backend: ProofBackend::Network,
                generated_at: Timestamp::now(),
                digest: parsed.proof,
            },
            public_inputs,
        })
    }

    async fn verify(
        &self,
        bundle: &ProofBundle,
        _policy: &JobPolicy,
        _attrs: &ApplicantAttributes,
    ) -> Result<bool, ProofError> {
        // The remote verifier only ever sees public inputs; attributes are
        // the local fallback path's concern.
        self.post_verify(bundle).await
    }

    async fn verify_public_only(
        &self,
        bundle: &ProofBundle,
        _policy: &JobPolicy,
    ) -> Result<bool, ProofError> {
        self.post_verify(bundle).await
    }

    async fn submit(
        &self,
        bundle: &ProofBundle,
        _policy: &JobPolicy,
    ) -> Result<SubmitReceipt, ProofError> {
        let url = self.config.endpoint(&self.config.rpc_url, "submit")?;
        let body = VerifyRequest {
            network_id: &self.config.network_id,
            verifier_address: self.config.verifier_address.as_deref(),
            bundle,
        };
        let response = self
            .request(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProofError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProofError::Network(e.to_string()))?;
        let parsed: SubmitResponse = response
            .json()
            .await
            .map_err(|e| ProofError::Network(e.to_string()))?;

        if !parsed.success {
            return Err(ProofError::Network("submission rejected by network".to_string()));
        }
        Ok(SubmitReceipt::accepted_for(bundle, parsed.tx_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkjb_core::{ApplicantSecret, JobId, RegionCode};

    fn config() -> NetworkConfig {
        NetworkConfig {
            rpc_url: Url::parse("http://127.0.0.1:1/").unwrap(),
            network_id: "testnet-02".to_string(),
            verifier_address: Some("0xabc".to_string()),
            api_key: None,
            proof_server_url: Some(Url::parse("http://127.0.0.1:1/").unwrap()),
        }
    }

    fn policy() -> JobPolicy {
        JobPolicy {
            id: JobId::new(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            required_skills: vec!["Rust".to_string()],
            min_experience_years: 1,
            allowed_regions: vec![RegionCode::EU],
            created_at: Timestamp::from_millis(0),
        }
    }

    #[test]
    fn proof_server_defaults_to_local_port() {
        let mut cfg = config();
        cfg.proof_server_url = None;
        assert_eq!(cfg.proof_server().as_str(), "http://localhost:6300/");
    }

    #[test]
    fn endpoint_joins_paths() {
        let cfg = config();
        let url = cfg.endpoint(&cfg.rpc_url, "verify").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1/verify");
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_network_error() {
        // Port 1 on loopback: connection refused, never a hang.
        let provider = NetworkProofProvider::new(config());
        let attrs = ApplicantAttributes {
            skills: vec!["Rust".to_string()],
            experience_years: 2,
            region: RegionCode::EU,
            secret: ApplicantSecret::generate(),
        };
        let err = provider.generate(&attrs, &policy()).await.unwrap_err();
        assert!(matches!(err, ProofError::Network(_)));
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = config();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: NetworkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
