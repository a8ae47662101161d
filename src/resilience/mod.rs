//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! RPC call to node:
//!     → timeouts.rs (enforce per-call deadline)
//!     → elapsed deadline surfaces as ChainError::Timeout
//! ```
//!
//! # Design Decisions
//! - Every RPC call has a deadline
//! - No retries: a signed document carries a single-use sequence
//! - Timeout errors are distinct from transport errors

pub mod timeouts;

pub use timeouts::with_deadline;
