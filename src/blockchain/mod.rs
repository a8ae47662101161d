//! Node integration subsystem.
//!
//! # Data Flow
//! ```text
//! RpcConfig (endpoint URL, timeout)
//!     → client.rs (JSON-RPC over HTTP with deadlines)
//!     → wire.rs (envelope, ResponseBase, commit result shapes)
//!     → account.rs (auth/accounts/{address} → Account)
//!     → codec.rs (base64 on the wire, uppercase hex for display)
//! ```
//!
//! # Constraints
//! - Every RPC call has a configurable deadline
//! - Chain-provided `Log` strings are surfaced verbatim
//! - Nothing here retries; callers decide what a failure means

pub mod account;
pub mod client;
pub mod codec;
pub mod types;
pub mod wire;

pub use account::AccountResolver;
pub use client::RpcClient;
pub use types::{Account, ChainError, ChainResult};
