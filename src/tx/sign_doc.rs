//! Canonical sign documents.
//!
//! The signer hashes the exact JSON bytes of the document, so emission order
//! is fixed: keys are alphabetical at every level (amino JSON convention),
//!
//! ```text
//! {"account_number","chain_id","fee":{"amount":[{"amount","denom"}],"gas"},
//!  "memo","msgs":[{"type","value":{"args","caller","func","pkg_path","send"}}],
//!  "sequence"}
//! ```
//!
//! and all 64-bit integers are decimal strings.

use serde::{Deserialize, Serialize};

use crate::blockchain::types::{Account, ChainError, ChainResult};
use crate::config::ClientConfig;
use crate::tx::amino::u64_string;
use crate::tx::fee::Fee;
use crate::tx::message::Message;

/// The document an account holder signs to authorize one transaction.
///
/// Field order here is the serialization order; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDoc {
    #[serde(with = "u64_string")]
    pub account_number: u64,
    pub chain_id: String,
    pub fee: Fee,
    pub memo: String,
    pub msgs: Vec<Message>,
    #[serde(with = "u64_string")]
    pub sequence: u64,
}

impl SignDoc {
    /// The exact bytes the signer signs.
    pub fn sign_bytes(&self) -> ChainResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ChainError::Encode(format!("sign doc: {}", e)))
    }
}

/// Stamps a fetched account and the fee policy onto a message.
#[derive(Debug, Clone)]
pub struct SignDocBuilder {
    chain_id: String,
    fee: Fee,
    memo: String,
}

impl SignDocBuilder {
    pub fn new(chain_id: impl Into<String>, fee: Fee) -> Self {
        Self {
            chain_id: chain_id.into(),
            fee,
            memo: String::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.chain.chain_id.clone(), Fee::from(&config.fee)).with_memo(config.fee.memo.clone())
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Build the sign document for a single message.
    pub fn build(&self, account: &Account, message: Message) -> SignDoc {
        SignDoc {
            account_number: account.account_number,
            chain_id: self.chain_id.clone(),
            fee: self.fee.clone(),
            memo: self.memo.clone(),
            msgs: vec![message],
            sequence: account.sequence,
        }
    }
}
