//! Fingerprints of normalized messages.
//!
//! A fingerprint is computed as: `sha256(domain_separator || normalized_bytes)`
//! and encoded as base64url without padding. Two messages share a
//! fingerprint exactly when they share a normalized form.

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::pipeline::Pipeline;
use crate::validation::ValidationError;

/// Domain separator for fingerprint computation: `b"errshape:fingerprint:v1\0"`.
const FINGERPRINT_DOMAIN_SEPARATOR: &[u8] = b"errshape:fingerprint:v1\0";

static DIGEST_B64: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{43}$").expect("invalid regex"));

/// Supported fingerprint digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FingerprintAlg {
    /// SHA-256.
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Algorithm + digest of a normalized message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Digest algorithm (currently always `sha-256`).
    pub alg: FingerprintAlg,
    /// Base64URL (no padding) digest bytes.
    pub b64: String,
}

impl Fingerprint {
    /// Constructs a validated fingerprint, e.g. one read back from storage.
    pub fn new(alg: FingerprintAlg, b64: impl Into<String>) -> Result<Self, ValidationError> {
        let b64 = b64.into();
        if !DIGEST_B64.is_match(&b64) {
            return Err(ValidationError::PatternMismatch {
                field: "fingerprint",
                value: b64,
            });
        }
        Ok(Fingerprint { alg, b64 })
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.b64)
    }
}

/// Normalizes `message` with the default pipeline and fingerprints the result.
///
/// ```rust
/// use errshape_normalize::fingerprint;
///
/// let a = fingerprint("connection reset by 10.0.0.1:5432");
/// let b = fingerprint("connection reset by 10.0.0.7:6543");
/// assert_eq!(a, b);
/// ```
pub fn fingerprint(message: &str) -> Fingerprint {
    Pipeline::global().fingerprint(message)
}

/// Fingerprints an already-normalized message.
pub fn fingerprint_normalized(normalized: &str) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(FINGERPRINT_DOMAIN_SEPARATOR);
    hasher.update(normalized.as_bytes());
    let hash_bytes = hasher.finalize();

    Fingerprint {
        alg: FingerprintAlg::Sha256,
        b64: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash_bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_has_expected_shape() {
        let fp = fingerprint_normalized("boom");
        assert_eq!(fp.b64.len(), 43);
        assert!(Fingerprint::new(fp.alg, fp.b64.clone()).is_ok());
    }

    #[test]
    fn distinct_shapes_distinct_fingerprints() {
        assert_ne!(fingerprint_normalized("a {NUMBER}"), fingerprint_normalized("b {NUMBER}"));
    }

    #[test]
    fn empty_normalized_form_has_fingerprint() {
        assert_eq!(fingerprint(""), fingerprint_normalized(""));
    }

    #[test]
    fn rejects_malformed_digest() {
        assert!(Fingerprint::new(FingerprintAlg::Sha256, "not base64!").is_err());
        assert!(Fingerprint::new(FingerprintAlg::Sha256, "A".repeat(44)).is_err());
    }

    #[test]
    fn serializes_to_tagged_shape() {
        let fp = fingerprint_normalized("boom");
        let json = serde_json::to_value(&fp).unwrap();
        assert_eq!(json["alg"], "sha-256");
        assert_eq!(json["b64"], fp.b64);
    }
}
