//! Tamper-evident record fingerprints
//!
//! Every registered cask record is sealed with a SHA-256 digest over its
//! registration-time fields. The digest is stored alongside the record and
//! re-derived on display, so silent edits to the stored file are visible.

use sha2::{Digest, Sha256};

/// Computes the hex-encoded SHA-256 fingerprint of an ordered field sequence.
///
/// Each field is length-prefixed inside the digest input, so free-form values
/// (notes can contain anything, newlines included) cannot shift bytes across
/// a field boundary and collide with a different sequence.
pub fn seal(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part.as_bytes());
    }
    let hash = hasher.finalize();
    format!("{hash:x}")
}

/// Recomputes the fingerprint and compares it to a stored value
pub fn verify(parts: &[&str], expected: &str) -> bool {
    seal(parts) == expected
}
