//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, gas > 0)
//! - Check the RPC URL is an http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Signer program is checked where a signer is actually built

use crate::config::schema::ClientConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `fee.gas_wanted`).
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.rpc.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field: "rpc.url",
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: "rpc.url",
            message: format!("invalid URL '{}': {}", config.rpc.url, e),
        }),
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "rpc.timeout_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    if config.chain.chain_id.trim().is_empty() {
        errors.push(ValidationError {
            field: "chain.chain_id",
            message: "must not be empty".to_string(),
        });
    }

    if config.fee.gas_wanted <= 0 {
        errors.push(ValidationError {
            field: "fee.gas_wanted",
            message: "must be greater than 0".to_string(),
        });
    }

    if config.fee.amount < 0 {
        errors.push(ValidationError {
            field: "fee.amount",
            message: "must not be negative".to_string(),
        });
    }

    if config.fee.denom.is_empty() || !config.fee.denom.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
        errors.push(ValidationError {
            field: "fee.denom",
            message: format!("invalid denom '{}'", config.fee.denom),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
