//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap RPC calls with a deadline
//! - Report elapsed deadlines as `ChainError::Timeout`, never as a network error
//!
//! The external signer is not wrapped: it waits on a human.

use std::future::Future;
use std::time::Duration;

use crate::blockchain::types::{ChainError, ChainResult};

/// Run `fut` under `deadline`, mapping expiry to a `Timeout` error for `method`.
pub async fn with_deadline<T, F>(method: &str, deadline: Duration, fut: F) -> ChainResult<T>
where
    F: Future<Output = ChainResult<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(method = method, timeout_secs = deadline.as_secs(), "RPC deadline elapsed");
            Err(ChainError::Timeout {
                method: method.to_string(),
                secs: deadline.as_secs(),
            })
        }
    }
}
