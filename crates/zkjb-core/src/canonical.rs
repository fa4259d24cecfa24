//! # Canonical Serialization
//!
//! Defines [`CanonicalBytes`], the sole construction path for bytes used in
//! digest computation across the workspace. Policy hashes and proof tokens
//! must be invariant to field ordering and whitespace, so every digest input
//! is serialized through this module.
//!
//! ## Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct
//! `CanonicalBytes` is through [`CanonicalBytes::new()`], which serializes
//! with sorted object keys and compact separators and rejects floats. The
//! "wrong serialization path" class of digest-mismatch defects is therefore
//! structurally impossible.
//!
//! ## Rules
//!
//! 1. Reject floats — counts and years are integers, everything else is a
//!    string.
//! 2. Sort object keys lexicographically (`serde_json`'s default `BTreeMap`
//!    backing guarantees this for rebuilt values).
//! 3. Compact separators, no whitespace.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by canonical JSON serialization: sorted keys,
/// compact separators, no floats.
///
/// The inner `Vec<u8>` is private — downstream code cannot construct
/// `CanonicalBytes` except through [`CanonicalBytes::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All digest
    /// computation in the workspace must flow through this constructor.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let checked = reject_floats(value)?;
        Ok(Self(serde_json::to_vec(&checked)?))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively walk a JSON value and reject any non-integer number.
fn reject_floats(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                // as_f64 is always Some for an f64-backed number.
                return Err(CanonicalizationError::FloatRejected(
                    n.as_f64().unwrap_or(f64::NAN),
                ));
            }
            Ok(Value::Number(n))
        }
        Value::Object(map) => {
            let mut checked = serde_json::Map::new();
            for (k, v) in map {
                checked.insert(k, reject_floats(v)?);
            }
            Ok(Value::Object(checked))
        }
        Value::Array(arr) => {
            let checked: Result<Vec<_>, _> = arr.into_iter().map(reject_floats).collect();
            Ok(Value::Array(checked?))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_bytes_sorts_object_keys() {
        let a = CanonicalBytes::new(&json!({"b": 2, "a": 1})).unwrap();
        let b = CanonicalBytes::new(&json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), br#"{"a":1,"b":2}"#);
    }

    #[test]
    fn canonical_bytes_compact_separators() {
        let c = CanonicalBytes::new(&json!({"k": [1, 2], "s": "v"})).unwrap();
        let s = String::from_utf8(c.into_bytes()).unwrap();
        assert!(!s.contains(' '));
    }

    #[test]
    fn floats_are_rejected() {
        let err = CanonicalBytes::new(&json!({"years": 3.5})).unwrap_err();
        assert!(matches!(err, CanonicalizationError::FloatRejected(_)));
    }

    #[test]
    fn nested_floats_are_rejected() {
        let err = CanonicalBytes::new(&json!({"outer": {"inner": [1.25]}})).unwrap_err();
        assert!(matches!(err, CanonicalizationError::FloatRejected(_)));
    }

    #[test]
    fn integers_bools_nulls_pass_through() {
        let c = CanonicalBytes::new(&json!({"n": 40, "b": true, "x": null})).unwrap();
        assert_eq!(c.as_bytes(), br#"{"b":true,"n":40,"x":null}"#);
    }

    #[test]
    fn same_value_always_same_bytes() {
        let value = json!({"skills": ["Rust", "Go"], "min": 3});
        let c1 = CanonicalBytes::new(&value).unwrap();
        let c2 = CanonicalBytes::new(&value).unwrap();
        assert_eq!(c1, c2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn key_insertion_order_never_affects_bytes(
                pairs in proptest::collection::btree_map("[a-z]{1,6}", 0u32..100, 1..6)
            ) {
                let mut forward = serde_json::Map::new();
                for (k, v) in &pairs {
                    forward.insert(k.clone(), json!(v));
                }
                let mut reversed = serde_json::Map::new();
                for (k, v) in pairs.iter().rev() {
                    reversed.insert(k.clone(), json!(v));
                }
                prop_assert_eq!(
                    CanonicalBytes::new(&Value::Object(forward)).unwrap(),
                    CanonicalBytes::new(&Value::Object(reversed)).unwrap()
                );
            }

            #[test]
            fn any_integer_canonicalizes_deterministically(n in any::<i64>()) {
                let a = CanonicalBytes::new(&json!({"n": n})).unwrap();
                let b = CanonicalBytes::new(&json!({"n": n})).unwrap();
                prop_assert_eq!(a, b);
            }

            #[test]
            fn any_fractional_value_is_rejected(
                n in any::<f64>().prop_filter(
                    "finite and non-integral",
                    |f| f.is_finite() && f.fract() != 0.0
                )
            ) {
                let result = CanonicalBytes::new(&json!({"v": n}));
                prop_assert!(matches!(
                    result,
                    Err(CanonicalizationError::FloatRejected(_))
                ));
            }
        }
    }
}
