//! Unsigned realm call messages.

use serde::{Deserialize, Serialize};

/// Amino type tag of `vm.MsgCall` in sign documents.
pub const MSG_CALL_TYPE: &str = "/vm.m_call";

/// Body of a realm function call.
///
/// Fields are declared in alphabetical order; that is the order they are
/// emitted in the sign document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCall {
    /// Call arguments, passed verbatim and in order.
    pub args: Vec<String>,
    /// Address paying for and authorizing the call.
    pub caller: String,
    /// Realm function name.
    pub func: String,
    /// Realm package path, e.g. `gno.land/r/demo/hello`.
    pub pkg_path: String,
    /// Coins sent along with the call (`""` when none).
    pub send: String,
}

/// A chain message in sign-document form: `{"type": ..., "value": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub value: MsgCall,
}

/// Builds `vm.m_call` messages. Argument types are left for the chain to check.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    send: String,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach coins to send with the call (e.g. `"1000ugnot"`).
    pub fn with_send(mut self, send: impl Into<String>) -> Self {
        self.send = send.into();
        self
    }

    /// Build the unsigned call message.
    pub fn build(&self, sender: &str, pkg_path: &str, func: &str, args: &[String]) -> Message {
        Message {
            type_tag: MSG_CALL_TYPE.to_string(),
            value: MsgCall {
                args: args.to_vec(),
                caller: sender.to_string(),
                func: func.to_string(),
                pkg_path: pkg_path.to_string(),
                send: self.send.clone(),
            },
        }
    }
}
