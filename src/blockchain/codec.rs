//! Binary codec helpers for RPC payloads.
//!
//! Transactions travel as standard base64 on the wire; hashes are shown to
//! users as uppercase hex.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::blockchain::types::{ChainError, ChainResult};

/// Encode bytes as standard (padded) base64.
pub fn base64_encode(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

/// Decode standard base64 into bytes.
pub fn base64_decode(encoded: &str) -> ChainResult<Vec<u8>> {
    BASE64_STANDARD
        .decode(encoded.trim())
        .map_err(|e| ChainError::Decode(format!("invalid base64: {}", e)))
}

/// Convert a base64 string into its uppercase hex rendering.
pub fn base64_to_hex(encoded: &str) -> ChainResult<String> {
    Ok(hex::encode_upper(base64_decode(encoded)?))
}
