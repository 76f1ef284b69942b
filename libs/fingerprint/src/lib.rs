//! Spec fingerprints.
//!
//! Consumers of failure domain resources keep the hash of the spec they last
//! acted on and compare it with the hash of the current spec:
//!
//! - **Same hash**: nothing to do.
//! - **Different hash**: the declared partition changed.
//!
//! # Invariants
//!
//! - Hashes depend only on the JSON value, not on key order or formatting
//! - An omitted optional field and an explicit `false` hash differently
//! - The string form is `sha256:` followed by 32 lowercase hex digits

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Fingerprint errors.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// The value could not be converted to JSON.
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The string is not a `sha256:` hash.
    #[error("invalid spec hash: {0}")]
    InvalidHash(String),
}

/// A spec hash for deterministic comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecHash(String);

impl SpecHash {
    const PREFIX: &'static str = "sha256:";

    /// Compute a spec hash from canonical JSON.
    pub fn from_json(json: &serde_json::Value) -> Self {
        let canonical = canonical_json(json);
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let result = hasher.finalize();
        Self(format!("{}{}", Self::PREFIX, hex::encode(&result[..16]))) // First 16 bytes (128 bits)
    }

    /// Compute a spec hash of any serializable value.
    pub fn of<T: Serialize>(value: &T) -> Result<Self, FingerprintError> {
        let json = serde_json::to_value(value)?;
        Ok(Self::from_json(&json))
    }

    /// Parse a previously rendered hash.
    pub fn parse(s: &str) -> Result<Self, FingerprintError> {
        let digest = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| FingerprintError::InvalidHash(s.to_string()))?;
        let well_formed = digest.len() == 32
            && digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if !well_formed {
            return Err(FingerprintError::InvalidHash(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpecHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SpecHash {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Produce canonical JSON (sorted keys, no extra whitespace).
pub fn canonical_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => {
            let mut pairs: Vec<_> = map.iter().collect();
            pairs.sort_by_key(|(k, _)| *k);
            let inner: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("\"{}\":{}", escape_json_string(k), canonical_json(v)))
                .collect();
            format!("{{{}}}", inner.join(","))
        }
        serde_json::Value::Array(arr) => {
            let inner: Vec<String> = arr.iter().map(canonical_json).collect();
            format!("[{}]", inner.join(","))
        }
        serde_json::Value::String(s) => format!("\"{}\"", escape_json_string(s)),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

fn escape_json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Outcome of comparing a desired spec with the one last acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    /// No previous hash is known.
    New,
    /// The spec is unchanged.
    Unchanged,
    /// The spec changed since it was last acted on.
    Changed,
}

/// Compares current hashes against previously recorded ones, keyed by name.
///
/// Names only present in `previous` are returned separately as removed.
pub fn classify<'a>(
    current: &'a BTreeMap<String, SpecHash>,
    previous: &BTreeMap<String, SpecHash>,
) -> (BTreeMap<&'a str, Drift>, Vec<String>) {
    let drift = current
        .iter()
        .map(|(name, hash)| {
            let state = match previous.get(name) {
                None => Drift::New,
                Some(old) if old == hash => Drift::Unchanged,
                Some(_) => Drift::Changed,
            };
            (name.as_str(), state)
        })
        .collect();

    let removed = previous
        .keys()
        .filter(|name| !current.contains_key(*name))
        .cloned()
        .collect();

    (drift, removed)
}
