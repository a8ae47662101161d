//! Signed transaction envelope.
//!
//! Wire form:
//!
//! ```text
//! {"msg":[{"@type":"/vm.m_call",...fields}],
//!  "fee":{"gas_wanted":"...","gas_fee":"1gnot"},
//!  "signatures":[{"pub_key":{"@type":"/tm.PubKeySecp256k1","value":"..."},"signature":"..."}],
//!  "memo":""}
//! ```

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::blockchain::codec;
use crate::blockchain::types::{ChainError, ChainResult};
use crate::signer::Signature;
use crate::tx::fee::Fee;
use crate::tx::message::{Message, MsgCall};
use crate::tx::sign_doc::SignDoc;

/// Public key algorithms the chain accepts for single-signer transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Secp256k1,
    Ed25519,
}

impl KeyAlgorithm {
    /// Accepts both the signer-side amino names and the chain-side type URLs.
    pub fn from_tag(tag: &str) -> ChainResult<Self> {
        match tag {
            "tendermint/PubKeySecp256k1" | "/tm.PubKeySecp256k1" => Ok(Self::Secp256k1),
            "tendermint/PubKeyEd25519" | "/tm.PubKeyEd25519" => Ok(Self::Ed25519),
            other => Err(ChainError::UnsupportedKeyType(other.to_string())),
        }
    }

    pub fn wire_tag(&self) -> &'static str {
        match self {
            Self::Secp256k1 => "/tm.PubKeySecp256k1",
            Self::Ed25519 => "/tm.PubKeyEd25519",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WirePubKey {
    #[serde(rename = "@type")]
    pub type_tag: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxSignature {
    pub pub_key: WirePubKey,
    pub signature: String,
}

/// A transaction ready for `broadcast_tx_commit`. Always exactly one signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTx {
    #[serde(serialize_with = "serialize_tagged_msgs")]
    pub msg: Vec<Message>,
    #[serde(serialize_with = "serialize_wire_fee")]
    pub fee: Fee,
    pub signatures: Vec<TxSignature>,
    pub memo: String,
}

impl SignedTx {
    /// Bytes submitted to the node (base64-encoded by the RPC client).
    pub fn to_bytes(&self) -> ChainResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ChainError::Encode(format!("signed tx: {}", e)))
    }
}

#[derive(Serialize)]
struct TaggedMsg<'a> {
    #[serde(rename = "@type")]
    type_tag: &'a str,
    caller: &'a str,
    send: &'a str,
    pkg_path: &'a str,
    func: &'a str,
    args: &'a [String],
}

impl<'a> From<&'a Message> for TaggedMsg<'a> {
    fn from(msg: &'a Message) -> Self {
        let MsgCall {
            args,
            caller,
            func,
            pkg_path,
            send,
        } = &msg.value;
        Self {
            type_tag: &msg.type_tag,
            caller,
            send,
            pkg_path,
            func,
            args,
        }
    }
}

fn serialize_tagged_msgs<S: Serializer>(msgs: &[Message], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(msgs.len()))?;
    for msg in msgs {
        seq.serialize_element(&TaggedMsg::from(msg))?;
    }
    seq.end()
}

#[derive(Serialize)]
struct WireFee {
    gas_wanted: String,
    gas_fee: String,
}

fn serialize_wire_fee<S: Serializer>(fee: &Fee, serializer: S) -> Result<S::Ok, S::Error> {
    WireFee {
        gas_wanted: fee.gas_wanted.to_string(),
        gas_fee: fee.gas_fee(),
    }
    .serialize(serializer)
}

/// Assembles the broadcast envelope from a signed document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxEncoder;

impl TxEncoder {
    /// Wrap `signature` around the document it was computed over.
    ///
    /// `msg`, `fee` and `memo` are copied verbatim from `sign_doc`.
    pub fn encode(sign_doc: &SignDoc, signature: &Signature) -> ChainResult<SignedTx> {
        let algorithm = KeyAlgorithm::from_tag(&signature.pub_key.type_tag)?;

        // Both fields must be valid base64 before they go on the wire
        codec::base64_decode(&signature.pub_key.value)?;
        if codec::base64_decode(&signature.signature)?.is_empty() {
            return Err(ChainError::Decode("empty signature".to_string()));
        }

        Ok(SignedTx {
            msg: sign_doc.msgs.clone(),
            fee: sign_doc.fee.clone(),
            signatures: vec![TxSignature {
                pub_key: WirePubKey {
                    type_tag: algorithm.wire_tag().to_string(),
                    value: signature.pub_key.value.clone(),
                },
                signature: signature.signature.clone(),
            }],
            memo: sign_doc.memo.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::Account;
    use crate::signer::PubKey;
    use crate::tx::fee::Coin;
    use crate::tx::message::MessageBuilder;
    use crate::tx::sign_doc::SignDocBuilder;

    fn sample_doc() -> SignDoc {
        let account = Account {
            address: "g1abc".to_string(),
            account_number: 5,
            sequence: 9,
        };
        let msg = MessageBuilder::new().build(
            "g1abc",
            "gno.land/r/demo/boards",
            "CreateReply",
            &["1".to_string(), "2".to_string(), "hi".to_string()],
        );
        SignDocBuilder::new("testchain", Fee::new(3_000_000, Coin::new(1, "gnot")))
            .with_memo("via gnocall")
            .build(&account, msg)
    }

    fn signature(tag: &str) -> Signature {
        Signature {
            pub_key: PubKey {
                type_tag: tag.to_string(),
                value: "A+FhNtsiHE1hSv5Xuxh6T9EaPJhYSBUaOpUwV8qW0zYC".to_string(),
            },
            signature: codec::base64_encode(&[7u8; 64]),
        }
    }

    #[test]
    fn test_fields_preserved() {
        let doc = sample_doc();
        let tx = TxEncoder::encode(&doc, &signature("tendermint/PubKeySecp256k1")).unwrap();
        assert_eq!(tx.msg, doc.msgs);
        assert_eq!(tx.fee, doc.fee);
        assert_eq!(tx.memo, doc.memo);
        assert_eq!(tx.signatures.len(), 1);
        assert_eq!(tx.signatures[0].pub_key.type_tag, "/tm.PubKeySecp256k1");
    }

    #[test]
    fn test_wire_envelope() {
        let tx = TxEncoder::encode(&sample_doc(), &signature("/tm.PubKeyEd25519")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&tx.to_bytes().unwrap()).unwrap();

        assert_eq!(value["msg"][0]["@type"], "/vm.m_call");
        assert_eq!(value["msg"][0]["pkg_path"], "gno.land/r/demo/boards");
        assert_eq!(value["msg"][0]["args"], serde_json::json!(["1", "2", "hi"]));
        assert_eq!(value["fee"]["gas_wanted"], "3000000");
        assert_eq!(value["fee"]["gas_fee"], "1gnot");
        assert_eq!(value["signatures"][0]["pub_key"]["@type"], "/tm.PubKeyEd25519");
        assert_eq!(value["memo"], "via gnocall");
    }

    #[test]
    fn test_unknown_key_type() {
        let err = TxEncoder::encode(&sample_doc(), &signature("ethsecp256k1")).unwrap_err();
        assert!(matches!(err, ChainError::UnsupportedKeyType(ref t) if t == "ethsecp256k1"));
    }

    #[test]
    fn test_malformed_signature_bytes() {
        let mut sig = signature("/tm.PubKeySecp256k1");
        sig.signature = "***".to_string();
        assert!(matches!(
            TxEncoder::encode(&sample_doc(), &sig),
            Err(ChainError::Decode(_))
        ));
    }
}
