//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the minter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the minter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MinterConfig {
    /// Target network and RPC transport.
    pub network: NetworkConfig,

    /// Deployed NFT contract.
    pub contract: ContractConfig,

    /// Wallet-connector app metadata.
    pub app: AppMetadata,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network selection and RPC transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Target Sepolia instead of Ethereum mainnet.
    pub testnet: bool,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            testnet: false,
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            rpc_timeout_secs: 10,
            poll_interval_ms: 2_000,
        }
    }
}

/// NFT contract location.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractConfig {
    /// Contract address (0x-prefixed hex).
    pub address: String,
}

/// Metadata presented to wallets during connection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppMetadata {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub icon: String,
    /// WalletConnect cloud project id.
    pub walletconnect_project_id: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "NFT Minter".to_string(),
            description: None,
            url: "https://example.com".to_string(),
            icon: "https://example.com/logo.png".to_string(),
            walletconnect_project_id: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Prometheus exporter bind address; exporter disabled when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_address: None,
        }
    }
}
