//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rpc client, resolver, orchestrator produce:
//!     → logging.rs (structured log events per state transition)
//!     → metrics.rs (counters, histograms)
//! ```
//!
//! # Design Decisions
//! - Structured fields (chain_id, address, height) instead of formatted strings
//! - Logs on stderr; command output on stdout

pub mod logging;
pub mod metrics;
