//! Chain-specific types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export RpcConfig from config module to avoid duplication
pub use crate::config::schema::RpcConfig;

/// Errors that can occur while talking to a gno.land node or a signer.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The RPC endpoint could not be reached (connection refused, DNS, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// RPC request exceeded its deadline.
    #[error("RPC {method} timed out after {secs} seconds")]
    Timeout { method: String, secs: u64 },

    /// The JSON-RPC envelope itself reported an error.
    #[error("RPC protocol error {code}: {message}")]
    RpcProtocol { code: i64, message: String },

    /// `abci_query` returned a non-empty `ResponseBase.Error`.
    #[error("Chain query failed: {log}")]
    ChainQuery { error: String, log: String },

    /// Malformed base64 or JSON in a node response.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A document could not be serialized for signing or broadcast.
    #[error("Encode error: {0}")]
    Encode(String),

    /// The external signer rejected, errored or was dismissed.
    #[error("Signing declined: {0}")]
    SigningDeclined(String),

    /// CheckTx rejected the transaction; it never entered a block.
    #[error("Transaction rejected at CheckTx: {log}")]
    BroadcastRejected {
        error: String,
        log: String,
        gas_wanted: i64,
        gas_used: i64,
    },

    /// DeliverTx failed; the transaction was included but execution failed.
    #[error("Transaction failed at DeliverTx (height {height}, hash {hash}): {log}")]
    ExecutionFailed {
        error: String,
        log: String,
        height: i64,
        hash: String,
        gas_wanted: i64,
        gas_used: i64,
    },

    /// The signer returned a public key of an algorithm the encoder does not know.
    #[error("Unsupported public key type: {0}")]
    UnsupportedKeyType(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Snapshot of an account's signing metadata.
///
/// Fetched fresh for every broadcast; a stale sequence invalidates the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Bech32 address (`g1...`).
    pub address: String,
    /// Global account number assigned at account creation.
    pub account_number: u64,
    /// Number of transactions this account has committed.
    pub sequence: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChainError::Timeout {
            method: "abci_query".to_string(),
            secs: 10,
        };
        assert_eq!(err.to_string(), "RPC abci_query timed out after 10 seconds");

        let err = ChainError::ChainQuery {
            error: "/std.UnknownAddressError".to_string(),
            log: "unknown address".to_string(),
        };
        assert!(err.to_string().contains("unknown address"));
    }

    #[test]
    fn test_rejected_and_failed_are_distinct() {
        let rejected = ChainError::BroadcastRejected {
            error: "insufficient fee".to_string(),
            log: "insufficient fee".to_string(),
            gas_wanted: 0,
            gas_used: 0,
        };
        assert!(rejected.to_string().contains("CheckTx"));

        let failed = ChainError::ExecutionFailed {
            error: "out of gas".to_string(),
            log: "out of gas in location".to_string(),
            height: 12,
            hash: "AB".to_string(),
            gas_wanted: 100,
            gas_used: 100,
        };
        assert!(failed.to_string().contains("DeliverTx"));
        assert!(failed.to_string().contains("height 12"));
    }
}
