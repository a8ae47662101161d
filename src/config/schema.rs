//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for gnocall.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Node RPC endpoint and timeouts.
    pub rpc: RpcConfig,

    /// Static chain descriptor handed to the signer.
    pub chain: ChainConfig,

    /// Fee policy applied to every sign document.
    pub fee: FeeConfig,

    /// External signer command.
    pub signer: SignerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// JSON-RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL (tm2 node, usually port 26657).
    pub url: String,

    /// Deadline for each `abci_query` / `broadcast_tx_commit` call, in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:26657".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Chain descriptor settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Chain ID stamped into every sign document.
    pub chain_id: String,

    /// Human-readable chain name shown by the signer.
    pub chain_name: String,

    /// Bech32 human-readable prefix for account addresses.
    pub bech32_prefix: String,

    /// Base denomination of the staking/fee currency.
    pub denom: String,

    /// Display decimals of `denom`.
    pub coin_decimals: u8,

    /// Gas price steps offered by the signer UI.
    pub gas_price_steps: GasPriceSteps,

    /// Signer feature flags.
    pub features: Vec<String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: "dev".to_string(),
            chain_name: "Gno.land".to_string(),
            bech32_prefix: "g".to_string(),
            denom: "ugnot".to_string(),
            coin_decimals: 6,
            gas_price_steps: GasPriceSteps::default(),
            features: Vec::new(),
        }
    }
}

/// Gas price steps, in `denom` per unit of gas.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GasPriceSteps {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

impl Default for GasPriceSteps {
    fn default() -> Self {
        Self {
            low: 0.01,
            average: 0.025,
            high: 0.04,
        }
    }
}

/// Fee policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Gas limit requested for the transaction.
    pub gas_wanted: i64,

    /// Fee amount, in `denom`.
    pub amount: i64,

    /// Fee denomination.
    pub denom: String,

    /// Memo attached to every transaction.
    pub memo: String,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            gas_wanted: 2_000_000,
            amount: 1,
            denom: "gnot".to_string(),
            memo: String::new(),
        }
    }
}

/// External signer process.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SignerConfig {
    /// Program spawned for each signer request.
    pub program: String,

    /// Extra arguments passed to `program`.
    pub args: Vec<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
