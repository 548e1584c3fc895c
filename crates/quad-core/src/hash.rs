use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::QuadError;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal SHA-256 digest of the canonical JSON encoding.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, QuadError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

/// Rounds a floating point value to the precision used in hashed reports.
///
/// Non-finite values pass through untouched.
pub fn round_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = (value * 1e12).round();
    scaled / 1e12
}
