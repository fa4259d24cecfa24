//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the job board. Each identifier is a
//! distinct type — you cannot pass a [`JobId`] where an [`ApplicationId`]
//! is expected.
//!
//! UUID-based identifiers ([`JobId`], [`ApplicationId`]) are always valid
//! by construction. String-based values ([`Nullifier`], [`ApplicantSecret`])
//! validate format at construction time.
//!
//! The applicant secret is the one value that must never reach persistent
//! storage: it is zeroized on drop and redacted in `Debug` output.

use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::IdentityError;

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// Unique identifier of a job policy. Doubles as a public input to proofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    /// Create a new random job identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a job identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse from a string form.
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| IdentityError::InvalidUuid(s.to_string()))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of an application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    /// Create a new random application identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an application identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse from a string form.
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| IdentityError::InvalidUuid(s.to_string()))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Validated string values
// ---------------------------------------------------------------------------

fn is_lowercase_hex_64(s: &str) -> bool {
    s.len() == 64
        && s.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// A nullifier: the deterministic fingerprint of one (job, secret) pair.
///
/// Always 64 lowercase hex characters (a SHA-256 digest). The nullifier
/// identifies one applicant's one attempt at one job without identifying
/// the applicant; uniqueness checks downstream reject reuse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nullifier(String);

impl Nullifier {
    /// Create a nullifier from a digest hex string, validating shape.
    pub fn new(hex: String) -> Result<Self, IdentityError> {
        if !is_lowercase_hex_64(&hex) {
            return Err(IdentityError::InvalidNullifier(hex.len()));
        }
        Ok(Self(hex))
    }

    /// The hex string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nullifier {
    type Error = IdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Nullifier> for String {
    fn from(n: Nullifier) -> Self {
        n.0
    }
}

impl std::fmt::Display for Nullifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The applicant's client-generated secret: 64 lowercase hex characters
/// encoding 32 random bytes.
///
/// Exists only transiently during proof generation. Never serialized into
/// any persisted record; zeroized on drop; `Debug` prints a redaction
/// marker instead of the value.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApplicantSecret(String);

impl ApplicantSecret {
    /// Create a secret from an existing hex string, validating format.
    pub fn new(hex: String) -> Result<Self, IdentityError> {
        if !is_lowercase_hex_64(&hex) {
            return Err(IdentityError::InvalidSecret);
        }
        Ok(Self(hex))
    }

    /// Generate a fresh random secret from the OS entropy source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Expose the hex form for nullifier derivation.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApplicantSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApplicantSecret(<redacted>)")
    }
}
