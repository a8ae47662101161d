//! gno.land realm-call client library.
//!
//! Builds a `vm.m_call` message, has an external signer sign it, and submits
//! it to a tm2 node with `broadcast_tx_commit`.

pub mod blockchain;
pub mod broadcast;
pub mod config;
pub mod observability;
pub mod resilience;
pub mod signer;
pub mod tx;

pub use blockchain::{Account, ChainError, RpcClient};
pub use broadcast::{BroadcastFailure, BroadcastOrchestrator, TxCommitted};
pub use config::ClientConfig;
pub use signer::{CommandSigner, ExternalSigner};
pub use tx::MessageBuilder;
