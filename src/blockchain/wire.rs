//! JSON-RPC envelope and tm2 ABCI response shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Outgoing JSON-RPC 2.0 request.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: &'a str,
    pub params: Value,
}

/// Incoming JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// The `error` member of a JSON-RPC response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// tm2 `abci.ResponseBase`.
///
/// `Error` is an amino-tagged object on real nodes (`{"@type": ..., "value": ...}`)
/// and `null` on success; a plain string is accepted too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseBase {
    #[serde(rename = "Error", default)]
    pub error: Option<Value>,
    #[serde(rename = "Data", default)]
    pub data: Option<String>,
    #[serde(rename = "Log", default)]
    pub log: String,
    #[serde(rename = "Info", default)]
    pub info: String,
}

impl ResponseBase {
    /// Whether the node reported an error in this response.
    pub fn is_err(&self) -> bool {
        match &self.error {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(_) => true,
        }
    }

    /// Short human-readable form of the error (its amino type tag when present).
    pub fn error_string(&self) -> String {
        match &self.error {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Object(o)) => match o.get("@type").and_then(Value::as_str) {
                Some(tag) => tag.to_string(),
                None => Value::Object(o.clone()).to_string(),
            },
            Some(other) => other.to_string(),
        }
    }
}

/// `result` of `abci_query`.
#[derive(Debug, Deserialize)]
pub struct AbciQueryResult {
    pub response: AbciQueryResponse,
}

#[derive(Debug, Deserialize)]
pub struct AbciQueryResponse {
    #[serde(rename = "ResponseBase", default)]
    pub base: ResponseBase,
    #[serde(rename = "Height", default, deserialize_with = "int_or_string")]
    pub height: i64,
}

/// One phase (`check_tx` or `deliver_tx`) of a commit broadcast.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxPhaseResult {
    #[serde(rename = "ResponseBase", default)]
    pub base: ResponseBase,
    #[serde(rename = "GasWanted", default, deserialize_with = "int_or_string")]
    pub gas_wanted: i64,
    #[serde(rename = "GasUsed", default, deserialize_with = "int_or_string")]
    pub gas_used: i64,
}

/// `result` of `broadcast_tx_commit`.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastTxCommitResult {
    #[serde(default)]
    pub check_tx: TxPhaseResult,
    /// Left raw: only read once CheckTx has passed, and may be null or
    /// partial when the transaction never reached a block.
    #[serde(default)]
    pub deliver_tx: Value,
    /// Base64 transaction hash.
    #[serde(default)]
    pub hash: String,
    #[serde(default, deserialize_with = "int_or_string")]
    pub height: i64,
}

/// Amino JSON renders 64-bit integers as strings; accept either form.
pub fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("integer out of range: {}", n))),
        Value::String(s) if s.is_empty() => Ok(0),
        Value::String(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer string: {:?}", s))),
        other => Err(serde::de::Error::custom(format!("expected integer, got {}", other))),
    }
}

/// Unsigned variant of [`int_or_string`] for account fields.
pub fn uint_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("expected unsigned integer: {}", n))),
        Value::String(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer string: {:?}", s))),
        other => Err(serde::de::Error::custom(format!("expected integer, got {}", other))),
    }
}
