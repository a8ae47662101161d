//! Transaction construction subsystem.
//!
//! # Data Flow
//! ```text
//! (sender, pkg_path, func, args)
//!     → message.rs (MessageBuilder → Message)
//!     → sign_doc.rs (Account + Message + chain id + Fee → SignDoc)
//!     → signer (external)
//!     → encoder.rs (SignDoc + Signature → SignedTx bytes)
//! ```
//!
//! # Design Decisions
//! - One message and one signature per transaction
//! - Sign documents serialize deterministically; see `sign_doc`
//! - No argument validation here, the VM checks types on execution

pub mod amino;
pub mod encoder;
pub mod fee;
pub mod message;
pub mod sign_doc;

pub use encoder::{SignedTx, TxEncoder};
pub use fee::{Coin, Fee};
pub use message::{Message, MessageBuilder, MsgCall};
pub use sign_doc::{SignDoc, SignDocBuilder};
