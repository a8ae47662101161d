//! JSON-RPC client for tm2 nodes with timeout and error handling.
//!
//! # Responsibilities
//! - POST JSON-RPC 2.0 requests to the node endpoint
//! - Enforce a deadline on every call
//! - Classify failures: transport, timeout, protocol, decode
//! - Provide the two typed calls the pipeline uses

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::blockchain::codec;
use crate::blockchain::types::{ChainError, ChainResult, RpcConfig};
use crate::blockchain::wire::{AbciQueryResult, BroadcastTxCommitResult, RpcRequest, RpcResponse};
use crate::observability::metrics;
use crate::resilience::with_deadline;

/// JSON-RPC method used to read application state.
pub const METHOD_ABCI_QUERY: &str = "abci_query";

/// JSON-RPC method used to submit a transaction and wait for its block.
pub const METHOD_BROADCAST_TX_COMMIT: &str = "broadcast_tx_commit";

/// JSON-RPC over HTTP client.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    /// Configuration.
    config: RpcConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl RpcClient {
    /// Create a new RPC client.
    ///
    /// No connection is made until the first call.
    pub fn new(config: RpcConfig) -> ChainResult<Self> {
        let url: url::Url = config.url.parse().map_err(|e| {
            ChainError::Network(format!("Invalid RPC URL '{}': {}", config.url, e))
        })?;

        let http = reqwest::Client::builder()
            .no_gzip()
            .build()
            .map_err(|e| ChainError::Network(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(rpc_url = %url, timeout_secs = config.timeout_secs, "RPC client created");

        Ok(Self {
            http,
            timeout_duration: Duration::from_secs(config.timeout_secs),
            config,
        })
    }

    /// Issue a JSON-RPC call and deserialize its `result`.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> ChainResult<T> {
        let started = Instant::now();
        let result: ChainResult<T> =
            with_deadline(method, self.timeout_duration, self.send(method, params))
                .await
                .and_then(|value| {
                    serde_json::from_value(value).map_err(|e| {
                        ChainError::Decode(format!("unexpected {} result: {}", method, e))
                    })
                });

        let outcome = match &result {
            Ok(_) => "ok",
            Err(ChainError::Timeout { .. }) => "timeout",
            Err(ChainError::Network(_)) => "network_error",
            Err(ChainError::RpcProtocol { .. }) => "protocol_error",
            Err(_) => "decode_error",
        };
        metrics::record_rpc_call(method, outcome, started.elapsed());

        result
    }

    async fn send(&self, method: &str, params: Value) -> ChainResult<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: uuid::Uuid::new_v4().to_string(),
            method,
            params,
        };

        let response = self
            .http
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::Network(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChainError::Network(format!("{} response read failed: {}", method, e)))?;

        let envelope: RpcResponse = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ChainError::RpcProtocol {
                    code: i64::from(status.as_u16()),
                    message: format!("HTTP {}: {}", status, body.trim()),
                });
            }
            Err(e) => {
                return Err(ChainError::Decode(format!("invalid JSON-RPC envelope: {}", e)));
            }
        };

        if let Some(error) = envelope.error {
            let message = match error.data {
                Some(Value::String(data)) if !data.is_empty() => format!("{}: {}", error.message, data),
                Some(Value::Null) | None => error.message,
                Some(data) => format!("{}: {}", error.message, data),
            };
            tracing::warn!(method = method, code = error.code, message = %message, "RPC returned error");
            return Err(ChainError::RpcProtocol {
                code: error.code,
                message,
            });
        }

        envelope.result.ok_or_else(|| ChainError::RpcProtocol {
            code: 0,
            message: format!("{} response has neither result nor error", method),
        })
    }

    /// Query application state at `path`.
    pub async fn abci_query(&self, path: &str) -> ChainResult<AbciQueryResult> {
        self.call(METHOD_ABCI_QUERY, json!({ "path": path })).await
    }

    /// Submit encoded transaction bytes and wait for CheckTx and DeliverTx.
    pub async fn broadcast_tx_commit(&self, tx_bytes: &[u8]) -> ChainResult<BroadcastTxCommitResult> {
        tracing::debug!(tx_size = tx_bytes.len(), "Broadcasting transaction");
        self.call(
            METHOD_BROADCAST_TX_COMMIT,
            json!({ "tx": codec::base64_encode(tx_bytes) }),
        )
        .await
    }

    /// Get the configuration.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("rpc_url", &self.config.url)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}
