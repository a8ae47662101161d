//! Account metadata resolution.
//!
//! Every broadcast fetches the account afresh: the sequence is consumed by
//! each committed transaction, so a cached value would produce signatures the
//! chain rejects.

use serde::Deserialize;
use serde_json::Value;

use crate::blockchain::client::RpcClient;
use crate::blockchain::codec;
use crate::blockchain::types::{Account, ChainError, ChainResult};
use crate::blockchain::wire::{uint_or_string, AbciQueryResult};

/// Query path prefix for account records.
pub const ACCOUNT_QUERY_PREFIX: &str = "auth/accounts/";

/// Embedded account record as rendered by the auth keeper (amino JSON).
#[derive(Debug, Deserialize)]
struct BaseAccountRecord {
    address: String,
    #[serde(deserialize_with = "uint_or_string")]
    account_number: u64,
    #[serde(deserialize_with = "uint_or_string")]
    sequence: u64,
}

/// Resolves account number and sequence through `abci_query`.
#[derive(Debug, Clone)]
pub struct AccountResolver {
    client: RpcClient,
}

impl AccountResolver {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Fetch the current account snapshot for `address`.
    pub async fn fetch(&self, address: &str) -> ChainResult<Account> {
        let path = format!("{}{}", ACCOUNT_QUERY_PREFIX, address);
        let result = self.client.abci_query(&path).await?;
        let account = expect_address(address, decode_account_query(&result)?)?;

        tracing::info!(
            address = %account.address,
            account_number = account.account_number,
            sequence = account.sequence,
            "Account fetched"
        );
        Ok(account)
    }
}

/// Interpret an `abci_query` result for an account path.
pub fn decode_account_query(result: &AbciQueryResult) -> ChainResult<Account> {
    let base = &result.response.base;
    if base.is_err() {
        tracing::warn!(error = %base.error_string(), log = %base.log, "Account query rejected");
        return Err(ChainError::ChainQuery {
            error: base.error_string(),
            log: base.log.clone(),
        });
    }

    let data = match base.data.as_deref() {
        Some(data) if !data.is_empty() => data,
        _ => {
            return Err(ChainError::Decode(
                "account query returned no data (account may not exist yet)".to_string(),
            ))
        }
    };

    decode_account_data(&codec::base64_decode(data)?)
}

/// Reject a record that belongs to some other address than the one queried.
fn expect_address(queried: &str, account: Account) -> ChainResult<Account> {
    if account.address != queried {
        tracing::warn!(queried = %queried, returned = %account.address, "Account query returned another address");
        return Err(ChainError::Decode(format!(
            "account query for {} returned the record of {}",
            queried, account.address
        )));
    }
    Ok(account)
}

/// Parse the JSON account document, with or without the `BaseAccount` wrapper.
pub fn decode_account_data(bytes: &[u8]) -> ChainResult<Account> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| ChainError::Decode(format!("account data is not JSON: {}", e)))?;

    let record = document.get("BaseAccount").unwrap_or(&document).clone();
    let record: BaseAccountRecord = serde_json::from_value(record)
        .map_err(|e| ChainError::Decode(format!("malformed account record: {}", e)))?;

    Ok(Account {
        address: record.address,
        account_number: record.account_number,
        sequence: record.sequence,
    })
}
