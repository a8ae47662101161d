//! Coins and the fee value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::blockchain::types::ChainError;
use crate::config::FeeConfig;
use crate::tx::amino::i64_string;

/// An amount of one denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(with = "i64_string")]
    pub amount: i64,
    pub denom: String,
}

impl Coin {
    pub fn new(amount: i64, denom: impl Into<String>) -> Self {
        Self {
            amount,
            denom: denom.into(),
        }
    }
}

/// Renders as `<amount><denom>`, e.g. `1gnot`; a zero coin renders empty.
impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount == 0 {
            return Ok(());
        }
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (amount, denom) = s.split_at(split);

        if amount.is_empty() || denom.is_empty() {
            return Err(ChainError::Decode(format!("invalid coin expression: {:?}", s)));
        }
        if !denom.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '/') {
            return Err(ChainError::Decode(format!("invalid denom: {:?}", denom)));
        }
        let amount = amount
            .parse()
            .map_err(|_| ChainError::Decode(format!("coin amount out of range: {:?}", amount)))?;

        Ok(Coin::new(amount, denom))
    }
}

/// Transaction fee: gas limit plus the coins paid for it.
///
/// Sign-document form is `{"amount": [...], "gas": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    #[serde(rename = "gas", with = "i64_string")]
    pub gas_wanted: i64,
}

impl Fee {
    pub fn new(gas_wanted: i64, coin: Coin) -> Self {
        Self {
            amount: vec![coin],
            gas_wanted,
        }
    }

    /// The `gas_fee` string of the broadcast envelope (`1gnot`).
    pub fn gas_fee(&self) -> String {
        self.amount
            .iter()
            .map(Coin::to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Flat default policy: one `1gnot` coin, 2,000,000 gas.
impl Default for Fee {
    fn default() -> Self {
        Self::from(&FeeConfig::default())
    }
}

impl From<&FeeConfig> for Fee {
    fn from(config: &FeeConfig) -> Self {
        Fee::new(config.gas_wanted, Coin::new(config.amount, config.denom.clone()))
    }
}
