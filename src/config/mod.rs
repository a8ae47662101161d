//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → shared by reference with rpc client, builders and orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; never mutated per broadcast
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ChainConfig;
pub use schema::ClientConfig;
pub use schema::FeeConfig;
pub use schema::RpcConfig;
pub use schema::SignerConfig;
