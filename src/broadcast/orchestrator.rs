//! Single-shot broadcast pipeline.
//!
//! # Responsibilities
//! - Enable the signer for the configured chain
//! - Fetch the caller's account, build and sign the document
//! - Encode, submit with `broadcast_tx_commit`, interpret both phases
//! - Attribute any failure to the last state reached
//!
//! Nothing is retried: the signed document embeds a single-use sequence.

use std::sync::Arc;

use crate::blockchain::account::AccountResolver;
use crate::blockchain::client::RpcClient;
use crate::blockchain::types::{ChainError, ChainResult};
use crate::broadcast::types::{interpret_commit, BroadcastFailure, BroadcastState, TxCommitted};
use crate::config::ClientConfig;
use crate::observability::metrics;
use crate::signer::{ChainDescriptor, ExternalSigner, SignOptions, SignResponse};
use crate::tx::encoder::TxEncoder;
use crate::tx::message::Message;
use crate::tx::sign_doc::{SignDoc, SignDocBuilder};

/// Tracks the state of one attempt and attributes failures to it.
struct Attempt<'a> {
    state: BroadcastState,
    caller: &'a str,
}

impl<'a> Attempt<'a> {
    fn new(caller: &'a str) -> Self {
        Self {
            state: BroadcastState::Init,
            caller,
        }
    }

    fn advance(&mut self, next: BroadcastState) {
        tracing::info!(caller = %self.caller, from = %self.state, to = %next, "Broadcast state transition");
        self.state = next;
    }

    fn check<T>(&self, result: ChainResult<T>) -> Result<T, BroadcastFailure> {
        result.map_err(|error| {
            let failure = BroadcastFailure {
                reached: self.state,
                error,
            };
            tracing::warn!(
                caller = %self.caller,
                reached = %failure.reached,
                to = %BroadcastState::Failed,
                error = %failure.error,
                "Broadcast failed"
            );
            metrics::record_broadcast(failure.outcome());
            failure
        })
    }
}

/// Drives `Init → AccountFetched → Signed → Broadcast → {Committed | Failed}`.
///
/// Holds only read-only collaborators; concurrent calls share no mutable state.
#[derive(Clone)]
pub struct BroadcastOrchestrator {
    rpc: RpcClient,
    resolver: AccountResolver,
    sign_docs: SignDocBuilder,
    signer: Arc<dyn ExternalSigner>,
    chain: ChainDescriptor,
    options: SignOptions,
}

impl BroadcastOrchestrator {
    pub fn new(rpc: RpcClient, signer: Arc<dyn ExternalSigner>, config: &ClientConfig) -> Self {
        Self {
            resolver: AccountResolver::new(rpc.clone()),
            rpc,
            sign_docs: SignDocBuilder::from_config(config),
            signer,
            chain: ChainDescriptor::from_config(config),
            options: SignOptions::preserve_document(),
        }
    }

    pub fn with_sign_options(mut self, options: SignOptions) -> Self {
        self.options = options;
        self
    }

    /// Run one complete broadcast attempt for `message`.
    pub async fn broadcast(&self, message: Message) -> Result<TxCommitted, BroadcastFailure> {
        let caller = message.value.caller.clone();
        let mut attempt = Attempt::new(&caller);

        attempt.check(self.signer.enable(&self.chain).await)?;

        let account = attempt.check(self.resolver.fetch(&caller).await)?;
        attempt.advance(BroadcastState::AccountFetched);

        let doc = self.sign_docs.build(&account, message);
        let response = attempt.check(
            self.signer
                .sign_amino(self.sign_docs.chain_id(), &caller, &doc, &self.options)
                .await,
        )?;
        attempt.check(self.verify_signed(&doc, &response))?;
        attempt.advance(BroadcastState::Signed);

        let tx = attempt.check(TxEncoder::encode(&response.signed, &response.signature))?;
        let bytes = attempt.check(tx.to_bytes())?;
        let result = attempt.check(self.rpc.broadcast_tx_commit(&bytes).await)?;
        attempt.advance(BroadcastState::Broadcast);

        let committed = attempt.check(interpret_commit(&result, account))?;
        attempt.advance(BroadcastState::Committed);
        metrics::record_broadcast("committed");

        tracing::info!(
            hash = %committed.hash,
            height = committed.height,
            gas_used = committed.gas_used,
            "Transaction committed"
        );
        Ok(committed)
    }

    /// The signer may only touch fee and memo, and only when allowed to.
    fn verify_signed(&self, requested: &SignDoc, response: &SignResponse) -> ChainResult<()> {
        let signed = &response.signed;
        let altered = if signed.chain_id != requested.chain_id {
            Some("chain_id")
        } else if signed.account_number != requested.account_number {
            Some("account_number")
        } else if signed.sequence != requested.sequence {
            Some("sequence")
        } else if signed.msgs != requested.msgs {
            Some("msgs")
        } else if self.options.prefer_no_set_fee && signed.fee != requested.fee {
            Some("fee")
        } else if self.options.prefer_no_set_memo && signed.memo != requested.memo {
            Some("memo")
        } else {
            None
        };

        match altered {
            Some(field) => Err(ChainError::SigningDeclined(format!(
                "signer altered {} of the sign document",
                field
            ))),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for BroadcastOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastOrchestrator")
            .field("rpc", &self.rpc)
            .field("chain_id", &self.chain.chain_id)
            .field("options", &self.options)
            .finish()
    }
}
