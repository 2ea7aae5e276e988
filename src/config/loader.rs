//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::MinterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Selects the test network when set to exactly `"true"`.
pub const ENABLE_TESTNET_ENV_VAR: &str = "NFT_MINT_ENABLE_TESTNET";
pub const RPC_URL_ENV_VAR: &str = "NFT_MINT_RPC_URL";
pub const CONTRACT_ENV_VAR: &str = "NFT_MINT_CONTRACT";
pub const PROJECT_NAME_ENV_VAR: &str = "NFT_MINT_PROJECT_NAME";
pub const PROJECT_DESCRIPTION_ENV_VAR: &str = "NFT_MINT_PROJECT_DESCRIPTION";
pub const PROJECT_ID_ENV_VAR: &str = "NFT_MINT_PROJECT_ID";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid contract address '{0}'")]
    InvalidAddress(String),

    #[error("Invalid RPC URL '{0}'")]
    InvalidUrl(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<MinterConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => MinterConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment values on top of file values.
///
/// `lookup` abstracts `std::env::var` so tests can supply their own table.
pub fn apply_env_overrides<F>(mut config: MinterConfig, lookup: F) -> MinterConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(flag) = lookup(ENABLE_TESTNET_ENV_VAR) {
        config.network.testnet = flag == "true";
    }
    if let Some(url) = lookup(RPC_URL_ENV_VAR) {
        config.network.rpc_url = url;
    }
    if let Some(address) = lookup(CONTRACT_ENV_VAR) {
        config.contract.address = address;
    }
    if let Some(name) = lookup(PROJECT_NAME_ENV_VAR) {
        config.app.name = name;
    }
    if let Some(description) = lookup(PROJECT_DESCRIPTION_ENV_VAR) {
        config.app.description = Some(description);
    }
    if let Some(project_id) = lookup(PROJECT_ID_ENV_VAR) {
        config.app.walletconnect_project_id = project_id;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = MinterConfig::default();
        config.network.rpc_url = "http://file:8545".to_string();

        let config = apply_env_overrides(
            config,
            env(&[
                (RPC_URL_ENV_VAR, "http://env:8545"),
                (ENABLE_TESTNET_ENV_VAR, "true"),
                (PROJECT_ID_ENV_VAR, "abc123"),
            ]),
        );

        assert_eq!(config.network.rpc_url, "http://env:8545");
        assert!(config.network.testnet);
        assert_eq!(config.app.walletconnect_project_id, "abc123");
    }

    #[test]
    fn test_testnet_flag_requires_exact_true() {
        let mut config = MinterConfig::default();
        config.network.testnet = true;

        let config = apply_env_overrides(config, env(&[(ENABLE_TESTNET_ENV_VAR, "TRUE")]));
        assert!(!config.network.testnet);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("nft_minter_loader_test.toml");
        fs::write(
            &path,
            r#"
            [contract]
            address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.observability.log_level, "debug");

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError {
                field: "a",
                reason: "bad".to_string(),
            },
            ValidationError {
                field: "b",
                reason: "worse".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: a: bad, b: worse");
    }
}
