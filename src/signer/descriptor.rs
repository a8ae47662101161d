//! Static chain descriptor handed to the signer at `enable` time.
//!
//! Pure data: the signer uses it to render prompts and derive addresses.

use serde::{Deserialize, Serialize};

use crate::config::schema::{ClientConfig, GasPriceSteps};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    /// Derive the full prefix set from the account prefix (`g` → `gpub`, `gvaloper`, ...).
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            bech32_prefix_acc_addr: prefix.to_string(),
            bech32_prefix_acc_pub: format!("{}pub", prefix),
            bech32_prefix_val_addr: format!("{}valoper", prefix),
            bech32_prefix_val_pub: format!("{}valoperpub", prefix),
            bech32_prefix_cons_addr: format!("{}valcons", prefix),
            bech32_prefix_cons_pub: format!("{}valconspub", prefix),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCurrency {
    #[serde(flatten)]
    pub currency: Currency,
    pub gas_price_step: GasPriceSteps,
}

/// Everything a signer needs to know about the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc: String,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub stake_currency: Currency,
    pub fee_currencies: Vec<FeeCurrency>,
    pub features: Vec<String>,
}

impl ChainDescriptor {
    pub fn from_config(config: &ClientConfig) -> Self {
        let chain = &config.chain;
        let currency = Currency {
            coin_denom: display_denom(&chain.denom),
            coin_minimal_denom: chain.denom.clone(),
            coin_decimals: chain.coin_decimals,
        };

        Self {
            chain_id: chain.chain_id.clone(),
            chain_name: chain.chain_name.clone(),
            rpc: config.rpc.url.clone(),
            bech32_config: Bech32Config::from_prefix(&chain.bech32_prefix),
            currencies: vec![currency.clone()],
            stake_currency: currency.clone(),
            fee_currencies: vec![FeeCurrency {
                currency,
                gas_price_step: chain.gas_price_steps,
            }],
            features: chain.features.clone(),
        }
    }
}

/// `ugnot` → `GNOT`: drop the micro prefix and upper-case.
fn display_denom(minimal: &str) -> String {
    let base = match minimal.strip_prefix('u') {
        Some(rest) if !rest.is_empty() => rest,
        _ => minimal,
    };
    base.to_uppercase()
}
