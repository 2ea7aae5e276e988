//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values: parseable URLs and
//! addresses, non-zero timeouts. Every problem is reported, not just the first.

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::MinterConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &MinterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.network.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new("network.rpc_url", e.to_string()));
    }
    for url in &config.network.failover_urls {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::new(
                "network.failover_urls",
                format!("invalid URL '{}'", url),
            ));
        }
    }
    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("network.rpc_timeout_secs", "must be > 0"));
    }
    if config.network.poll_interval_ms == 0 {
        errors.push(ValidationError::new("network.poll_interval_ms", "must be > 0"));
    }

    if config.contract.address.is_empty() {
        errors.push(ValidationError::new("contract.address", "not set"));
    } else if let Err(e) = config.contract.address.parse::<Address>() {
        errors.push(ValidationError::new("contract.address", e.to_string()));
    }

    if config.app.name.trim().is_empty() {
        errors.push(ValidationError::new("app.name", "must not be empty"));
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("invalid socket address '{}'", addr),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> MinterConfig {
        let mut config = MinterConfig::default();
        config.contract.address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = valid_config();
        config.network.rpc_url = "not a url".to_string();
        config.network.rpc_timeout_secs = 0;
        config.contract.address = "0x1234".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["network.rpc_url", "network.rpc_timeout_secs", "contract.address"]
        );
    }

    #[test]
    fn test_missing_contract_address() {
        let config = MinterConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].to_string(), "contract.address: not set");
    }
}
