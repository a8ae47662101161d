//! Signer backed by an external program.
//!
//! Each request spawns the configured program once, writes
//! `{"method": ..., "params": ...}` to its stdin and reads one JSON document
//! from its stdout. A non-zero exit, empty output, an `{"error": ...}` reply
//! or an unparseable reply all mean the user (or the signer) declined.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::blockchain::types::{ChainError, ChainResult};
use crate::config::SignerConfig;
use crate::signer::{ChainDescriptor, ExternalSigner, SignOptions, SignResponse};
use crate::tx::sign_doc::SignDoc;

#[derive(Debug, Clone)]
pub struct CommandSigner {
    program: String,
    args: Vec<String>,
}

impl CommandSigner {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &SignerConfig) -> ChainResult<Self> {
        if config.program.trim().is_empty() {
            return Err(ChainError::SigningDeclined(
                "no signer program configured (signer.program)".to_string(),
            ));
        }
        Ok(Self::new(config.program.clone(), config.args.clone()))
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> ChainResult<T> {
        let payload = serde_json::to_vec(&json!({ "method": method, "params": params }))
            .map_err(|e| ChainError::Encode(format!("signer request: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ChainError::SigningDeclined(format!("failed to start signer '{}': {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload).await {
                Ok(()) => {}
                // The signer may answer without reading the request; its exit
                // status and output decide the outcome
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!(method = method, "Signer closed stdin before reading the request");
                }
                Err(e) => {
                    return Err(ChainError::SigningDeclined(format!("failed to write signer request: {}", e)));
                }
            }
            // Dropping stdin closes the pipe so the signer sees EOF
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ChainError::SigningDeclined(format!("signer did not complete: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(method = method, status = %output.status, "Signer exited unsuccessfully");
            return Err(ChainError::SigningDeclined(format!(
                "signer exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if stdout.is_empty() {
            return Err(ChainError::SigningDeclined("signer produced no output".to_string()));
        }

        let reply: Value = serde_json::from_str(stdout)
            .map_err(|e| ChainError::SigningDeclined(format!("malformed signer response: {}", e)))?;

        if let Some(error) = reply.get("error").filter(|e| !e.is_null()) {
            let reason = error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string());
            return Err(ChainError::SigningDeclined(reason));
        }

        serde_json::from_value(reply)
            .map_err(|e| ChainError::SigningDeclined(format!("malformed signer response: {}", e)))
    }
}

#[async_trait]
impl ExternalSigner for CommandSigner {
    async fn enable(&self, chain: &ChainDescriptor) -> ChainResult<()> {
        let _: Value = self.request("enable", json!({ "chain": chain })).await?;
        tracing::debug!(chain_id = %chain.chain_id, "Signer enabled");
        Ok(())
    }

    async fn sign_amino(
        &self,
        chain_id: &str,
        signer_address: &str,
        sign_doc: &SignDoc,
        options: &SignOptions,
    ) -> ChainResult<SignResponse> {
        self.request(
            "sign_amino",
            json!({
                "chain_id": chain_id,
                "signer": signer_address,
                "sign_doc": sign_doc,
                "options": options,
            }),
        )
        .await
    }
}
