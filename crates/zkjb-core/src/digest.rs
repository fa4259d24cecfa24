//! # Content Digests
//!
//! Defines [`ContentDigest`] and the SHA-256 computation paths. Every
//! fingerprint in the system — policy hashes, nullifiers, proof tokens — is
//! a 256-bit digest rendered as 64 lowercase hex characters.
//!
//! ## Invariant
//!
//! [`sha256_digest`] accepts only [`CanonicalBytes`], never raw `&[u8]`.
//! This guarantees every structured digest was computed from canonicalized
//! data. [`sha256_raw`] and [`Sha256Accumulator`] exist for the two
//! documented exceptions where the input is a byte string by definition
//! (nullifier preimages and composite proof-token inputs).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// A 32-byte SHA-256 digest.
///
/// Serializes as its lowercase hex form, which is the wire and storage
/// representation everywhere in the job board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Return the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.len() != 64 || !s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            return Err(serde::de::Error::custom(
                "digest must be 64 lowercase hex characters",
            ));
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let hex = std::str::from_utf8(chunk).map_err(serde::de::Error::custom)?;
            bytes[i] = u8::from_str_radix(hex, 16).map_err(serde::de::Error::custom)?;
        }
        Ok(Self(bytes))
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// This is the standard digest path for structured values.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    sha256_raw(data.as_bytes())
}

/// Compute a SHA-256 digest over raw bytes.
///
/// Reserved for inputs that are byte strings by definition (e.g. the
/// `"{job_id}||{secret}"` nullifier preimage). Structured values must go
/// through [`sha256_digest`] instead.
pub fn sha256_raw(data: &[u8]) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    ContentDigest(hasher.finalize().into())
}

/// Incremental SHA-256 over multiple input segments.
///
/// Used where a digest covers a composite input (canonical bytes followed
/// by additional raw segments) without intermediate allocation.
#[derive(Default)]
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a segment of bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finalize and return the digest.
    pub fn finalize(self) -> ContentDigest {
        ContentDigest(self.hasher.finalize().into())
    }

    /// Finalize and return the digest as lowercase hex.
    pub fn finalize_hex(self) -> String {
        self.finalize().to_hex()
    }
}
