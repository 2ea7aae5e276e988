//! Process-wide chain configuration.
//!
//! Built once from a validated [`MinterConfig`] before any workflow runs and
//! shared read-only afterwards.

use std::time::Duration;

use alloy::primitives::Address;
use serde::Serialize;
use url::Url;

use crate::blockchain::types::ChainId;
use crate::config::loader::ConfigError;
use crate::config::schema::{AppMetadata, MinterConfig};

/// Block confirmations required before a mint counts as completed.
pub const CONFIRMATION_DEPTH: u64 = 3;

/// The single network a deployment operates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetChain {
    Mainnet,
    Sepolia,
}

impl TargetChain {
    pub fn from_testnet_flag(testnet: bool) -> Self {
        if testnet {
            Self::Sepolia
        } else {
            Self::Mainnet
        }
    }

    pub fn chain_id(self) -> ChainId {
        match self {
            Self::Mainnet => ChainId(1),
            Self::Sepolia => ChainId(11_155_111),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "Ethereum",
            Self::Sepolia => "Sepolia",
        }
    }

    /// Ticker of the native currency.
    pub fn currency(self) -> &'static str {
        "ETH"
    }
}

/// Immutable view of everything the wallet and RPC layers need.
#[derive(Debug, Clone, Serialize)]
pub struct ChainConfig {
    pub target: TargetChain,
    pub rpc_url: Url,
    pub failover_urls: Vec<Url>,
    #[serde(skip)]
    pub rpc_timeout: Duration,
    #[serde(skip)]
    pub poll_interval: Duration,
    pub contract_address: Address,
    pub app: AppMetadata,
    pub confirmations: u64,
}

impl ChainConfig {
    pub fn from_config(config: &MinterConfig) -> Result<Self, ConfigError> {
        let rpc_url: Url = config
            .network
            .rpc_url
            .parse()
            .map_err(|_| ConfigError::InvalidUrl(config.network.rpc_url.clone()))?;

        let failover_urls = config
            .network
            .failover_urls
            .iter()
            .map(|u| u.parse().map_err(|_| ConfigError::InvalidUrl(u.clone())))
            .collect::<Result<Vec<Url>, _>>()?;

        let contract_address: Address = config
            .contract
            .address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(config.contract.address.clone()))?;

        let target = TargetChain::from_testnet_flag(config.network.testnet);
        tracing::info!(
            chain = target.name(),
            chain_id = target.chain_id().0,
            contract = %contract_address,
            "Chain configuration initialized"
        );

        Ok(Self {
            target,
            rpc_url,
            failover_urls,
            rpc_timeout: Duration::from_secs(config.network.rpc_timeout_secs),
            poll_interval: Duration::from_millis(config.network.poll_interval_ms),
            contract_address,
            app: config.app.clone(),
            confirmations: CONFIRMATION_DEPTH,
        })
    }

    pub fn target_chain_id(&self) -> ChainId {
        self.target.chain_id()
    }
}
