//! Broadcast orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! Message
//!     → orchestrator.rs
//!         Init            signer.enable, AccountResolver::fetch
//!         AccountFetched  SignDocBuilder::build, signer.sign_amino
//!         Signed          TxEncoder::encode, RpcClient::broadcast_tx_commit
//!         Broadcast       types.rs interpret_commit (CheckTx, then DeliverTx)
//!     → TxCommitted | BroadcastFailure { reached, error }
//! ```
//!
//! # Design Decisions
//! - One account fetch, one sign request, one submission per attempt
//! - First failure aborts the attempt; no resumption

pub mod orchestrator;
pub mod types;

pub use orchestrator::BroadcastOrchestrator;
pub use types::{BroadcastFailure, BroadcastState, TxCommitted, TxPhase};
