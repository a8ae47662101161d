//! External signing capability.
//!
//! # Data Flow
//! ```text
//! orchestrator
//!     → ExternalSigner::enable(ChainDescriptor)
//!     → ExternalSigner::sign_amino(chain_id, address, SignDoc, SignOptions)
//!     ← SignResponse { signed, signature: { pub_key, signature } }
//! ```
//!
//! # Constraints
//! - Keys never enter this process; signing is out-of-process and may wait on a human
//! - At most one sign request per SignDoc, never retried
//! - Cancellation and signer faults surface as `ChainError::SigningDeclined`

pub mod command;
pub mod descriptor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::blockchain::types::ChainResult;
use crate::tx::sign_doc::SignDoc;

pub use command::CommandSigner;
pub use descriptor::ChainDescriptor;

/// Public key as returned by the signer (`{"type": ..., "value": base64}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub value: String,
}

/// A signature over one sign document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub pub_key: PubKey,
    /// Base64 signature bytes.
    pub signature: String,
}

/// Hints forwarded to the signer UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOptions {
    /// Ask the signer not to replace the fee.
    pub prefer_no_set_fee: bool,
    /// Ask the signer not to replace the memo.
    pub prefer_no_set_memo: bool,
    pub disable_balance_check: bool,
}

impl SignOptions {
    /// Keep the document exactly as built.
    pub fn preserve_document() -> Self {
        Self {
            prefer_no_set_fee: true,
            prefer_no_set_memo: true,
            disable_balance_check: false,
        }
    }
}

/// What the signer returns: the document it actually signed plus the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignResponse {
    pub signed: SignDoc,
    pub signature: Signature,
}

/// Out-of-process signer (browser wallet extension or equivalent).
///
/// Implementations must not retry; user cancellation or signer errors map to
/// `ChainError::SigningDeclined`.
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Make the chain known to the signer and request access.
    async fn enable(&self, chain: &ChainDescriptor) -> ChainResult<()>;

    /// Sign `sign_doc` with the key of `signer_address`.
    async fn sign_amino(
        &self,
        chain_id: &str,
        signer_address: &str,
        sign_doc: &SignDoc,
        options: &SignOptions,
    ) -> ChainResult<SignResponse>;
}
