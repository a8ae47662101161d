//! Broadcast states, outcomes and failure attribution.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::blockchain::codec;
use crate::blockchain::types::{Account, ChainError, ChainResult};
use crate::blockchain::wire::{BroadcastTxCommitResult, TxPhaseResult};

/// Pipeline state of one broadcast attempt.
///
/// ```text
/// Init → AccountFetched → Signed → Broadcast → {Committed | Failed}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastState {
    Init,
    AccountFetched,
    Signed,
    Broadcast,
    Committed,
    Failed,
}

impl fmt::Display for BroadcastState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::AccountFetched => "account_fetched",
            Self::Signed => "signed",
            Self::Broadcast => "broadcast",
            Self::Committed => "committed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Consensus phase at which a broadcast transaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxPhase {
    /// Mempool admission; the transaction never entered a block.
    CheckTx,
    /// Block execution; the transaction was included and gas may be charged.
    DeliverTx,
}

/// A transaction included in a block with both phases successful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxCommitted {
    /// Uppercase hex transaction hash.
    pub hash: String,
    pub height: i64,
    pub gas_wanted: i64,
    pub gas_used: i64,
    /// DeliverTx return data, UTF-8 (lossy).
    pub data: String,
    pub log: String,
    /// Account snapshot the transaction was signed against.
    pub account: Account,
}

/// Why an attempt stopped, and how far it got.
#[derive(Debug, Error)]
#[error("broadcast failed after reaching {reached}: {error}")]
pub struct BroadcastFailure {
    /// Last state successfully entered before the failure.
    pub reached: BroadcastState,
    #[source]
    pub error: ChainError,
}

impl BroadcastFailure {
    /// The consensus phase, when the failure came from the chain itself.
    pub fn tx_phase(&self) -> Option<TxPhase> {
        match self.error {
            ChainError::BroadcastRejected { .. } => Some(TxPhase::CheckTx),
            ChainError::ExecutionFailed { .. } => Some(TxPhase::DeliverTx),
            _ => None,
        }
    }

    /// Static label for metrics.
    pub fn outcome(&self) -> &'static str {
        match self.error {
            ChainError::BroadcastRejected { .. } => "rejected",
            ChainError::ExecutionFailed { .. } => "execution_failed",
            ChainError::SigningDeclined(_) => "declined",
            ChainError::Timeout { .. } => "timeout",
            _ => "error",
        }
    }
}

/// Render a node-provided hash (base64 on tm2) as uppercase hex.
pub fn render_hash(raw: &str) -> String {
    match codec::base64_to_hex(raw) {
        Ok(hex) => hex,
        // Already hex on some node versions
        Err(_) => raw.to_uppercase(),
    }
}

/// Classify a commit result. CheckTx is decided before DeliverTx is looked at.
pub fn interpret_commit(result: &BroadcastTxCommitResult, account: Account) -> ChainResult<TxCommitted> {
    let check = &result.check_tx;
    if check.base.is_err() {
        return Err(ChainError::BroadcastRejected {
            error: check.base.error_string(),
            log: check.base.log.clone(),
            gas_wanted: check.gas_wanted,
            gas_used: check.gas_used,
        });
    }

    let deliver: TxPhaseResult = serde_json::from_value(result.deliver_tx.clone())
        .map_err(|e| ChainError::Decode(format!("unexpected deliver_tx result: {}", e)))?;
    let hash = render_hash(&result.hash);
    if deliver.base.is_err() {
        return Err(ChainError::ExecutionFailed {
            error: deliver.base.error_string(),
            log: deliver.base.log.clone(),
            height: result.height,
            hash,
            gas_wanted: deliver.gas_wanted,
            gas_used: deliver.gas_used,
        });
    }

    let data = deliver
        .base
        .data
        .as_deref()
        .and_then(|d| codec::base64_decode(d).ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();

    Ok(TxCommitted {
        hash,
        height: result.height,
        gas_wanted: deliver.gas_wanted,
        gas_used: deliver.gas_used,
        data,
        log: deliver.base.log.clone(),
        account,
    })
}
