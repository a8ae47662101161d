//! Shared utilities for integration testing: a programmable tm2 node and signer.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use gnocall::blockchain::codec;
use gnocall::blockchain::ChainResult;
use gnocall::signer::{ChainDescriptor, ExternalSigner, PubKey, SignOptions, SignResponse, Signature};
use gnocall::tx::{Coin, Fee, SignDoc};
use gnocall::{ChainError, ClientConfig};

/// Builds the JSON-RPC body (minus `jsonrpc`/`id`) for a method and its params.
pub type Responder = Arc<dyn Fn(&str, &Value) -> Value + Send + Sync>;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

#[derive(Clone)]
struct NodeState {
    responder: Responder,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Mock tm2 JSON-RPC node bound to an ephemeral port.
pub struct MockNode {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockNode {
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        Self::start_with_delay(Duration::ZERO, responder).await
    }

    /// Like [`MockNode::start`], but every response is held back for `delay`.
    pub async fn start_with_delay<F>(delay: Duration, responder: F) -> Self
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = NodeState {
            responder: Arc::new(responder),
            delay,
            calls: calls.clone(),
        };

        let app = Router::new().route("/", post(handle_rpc)).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, calls }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests received for `method`.
    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn last_params(&self, method: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| c.method == method)
            .map(|c| c.params.clone())
    }
}

async fn handle_rpc(State(state): State<NodeState>, Json(request): Json<Value>) -> Json<Value> {
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].clone();
    state.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        params: params.clone(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    let mut body = (state.responder)(&method, &params);
    body["jsonrpc"] = json!("2.0");
    body["id"] = request["id"].clone();
    Json(body)
}

/// Client configuration pointed at `node`.
pub fn config_for(node: &MockNode) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.rpc.url = node.url();
    config.rpc.timeout_secs = 2;
    config
}

pub fn rpc_result(result: Value) -> Value {
    json!({ "result": result })
}

pub fn rpc_error(code: i64, message: &str, data: &str) -> Value {
    json!({ "error": { "code": code, "message": message, "data": data } })
}

/// `abci_query` result for an existing account, amino-JSON encoded.
pub fn account_result(address: &str, account_number: u64, sequence: u64) -> Value {
    let record = json!({
        "BaseAccount": {
            "address": address,
            "coins": "10000000ugnot",
            "public_key": null,
            "account_number": account_number.to_string(),
            "sequence": sequence.to_string()
        }
    });
    let data = codec::base64_encode(record.to_string().as_bytes());
    rpc_result(json!({
        "response": {
            "ResponseBase": { "Error": null, "Data": data, "Events": null, "Log": "", "Info": "" },
            "Key": null,
            "Value": null,
            "Proof": null,
            "Height": "0"
        }
    }))
}

/// `abci_query` result for an address the auth keeper does not know.
pub fn unknown_account_result(address: &str) -> Value {
    rpc_result(json!({
        "response": {
            "ResponseBase": {
                "Error": { "@type": "/std.UnknownAddressError", "value": {} },
                "Data": null,
                "Log": format!("account {} does not exist", address),
                "Info": ""
            },
            "Height": "0"
        }
    }))
}

pub fn tx_hash() -> [u8; 32] {
    let mut hash = [0u8; 32];
    for (i, byte) in hash.iter_mut().enumerate() {
        *byte = (i as u8).wrapping_mul(37).wrapping_add(0xA5);
    }
    hash
}

fn phase(error: Value, log: &str, gas_used: &str, data: Option<&str>) -> Value {
    json!({
        "ResponseBase": {
            "Error": error,
            "Data": data.map(|d| codec::base64_encode(d.as_bytes())),
            "Events": null,
            "Log": log,
            "Info": ""
        },
        "GasWanted": "2000000",
        "GasUsed": gas_used
    })
}

pub fn committed_result(height: &str) -> Value {
    rpc_result(json!({
        "check_tx": phase(Value::Null, "", "0", None),
        "deliver_tx": phase(Value::Null, "msg:0,success:true,log:,events:[]", "81233", Some("(1 int)")),
        "hash": codec::base64_encode(&tx_hash()),
        "height": height
    }))
}

pub fn check_tx_rejected(error: &str, log: &str) -> Value {
    rpc_result(json!({
        "check_tx": phase(json!(error), log, "0", None),
        "deliver_tx": phase(json!({ "@type": "/vm.VMError", "value": {} }), "must not be read", "0", None),
        "hash": codec::base64_encode(&tx_hash()),
        "height": "0"
    }))
}

pub fn deliver_tx_failed(log: &str) -> Value {
    rpc_result(json!({
        "check_tx": phase(Value::Null, "", "0", None),
        "deliver_tx": phase(json!({ "@type": "/vm.VMError", "value": {} }), log, "120000", None),
        "hash": codec::base64_encode(&tx_hash()),
        "height": "57"
    }))
}

/// Fee a signer substitutes when allowed to set its own.
pub fn signer_fee() -> Fee {
    Fee::new(3_000_000, Coin::new(5, "ugnot"))
}

pub const SIGNER_MEMO: &str = "sent from wallet";

/// How a [`MockSigner`] answers `sign_amino`.
#[derive(Debug, Clone)]
pub enum SignBehavior {
    Approve,
    Decline,
    /// Approve, but hand back a document with a bumped sequence.
    AlterSequence,
    /// Approve after replacing the fee with [`signer_fee`].
    AlterFee,
    /// Approve after replacing the memo with [`SIGNER_MEMO`].
    AlterMemo,
    /// Approve, reporting this public key type.
    KeyType(&'static str),
}

/// In-process stand-in for a wallet extension.
pub struct MockSigner {
    behavior: SignBehavior,
    enables: AtomicUsize,
    signs: AtomicUsize,
    last_doc: Mutex<Option<SignDoc>>,
}

impl MockSigner {
    pub fn new(behavior: SignBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            enables: AtomicUsize::new(0),
            signs: AtomicUsize::new(0),
            last_doc: Mutex::new(None),
        })
    }

    pub fn enables(&self) -> usize {
        self.enables.load(Ordering::SeqCst)
    }

    pub fn signs(&self) -> usize {
        self.signs.load(Ordering::SeqCst)
    }

    pub fn last_doc(&self) -> Option<SignDoc> {
        self.last_doc.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExternalSigner for MockSigner {
    async fn enable(&self, _chain: &ChainDescriptor) -> ChainResult<()> {
        self.enables.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_amino(
        &self,
        _chain_id: &str,
        _signer_address: &str,
        sign_doc: &SignDoc,
        _options: &SignOptions,
    ) -> ChainResult<SignResponse> {
        self.signs.fetch_add(1, Ordering::SeqCst);
        *self.last_doc.lock().unwrap() = Some(sign_doc.clone());

        let mut signed = sign_doc.clone();
        let key_type = match self.behavior {
            SignBehavior::Decline => {
                return Err(ChainError::SigningDeclined("Request rejected".to_string()))
            }
            SignBehavior::AlterSequence => {
                signed.sequence += 1;
                "tendermint/PubKeySecp256k1"
            }
            SignBehavior::AlterFee => {
                signed.fee = signer_fee();
                "tendermint/PubKeySecp256k1"
            }
            SignBehavior::AlterMemo => {
                signed.memo = SIGNER_MEMO.to_string();
                "tendermint/PubKeySecp256k1"
            }
            SignBehavior::KeyType(tag) => tag,
            SignBehavior::Approve => "tendermint/PubKeySecp256k1",
        };

        Ok(SignResponse {
            signed,
            signature: Signature {
                pub_key: PubKey {
                    type_tag: key_type.to_string(),
                    value: "A+FhNtsiHE1hSv5Xuxh6T9EaPJhYSBUaOpUwV8qW0zYC".to_string(),
                },
                signature: codec::base64_encode(&[0x5Au8; 64]),
            },
        })
    }
}
