//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint
//! - Query chain state (chain id, block number, balances, receipts)
//! - Execute read-only contract calls
//! - Handle timeouts and network errors gracefully

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::TransportError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::ChainConfig;
use crate::observability::metrics;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Shared chain configuration.
    config: Arc<ChainConfig>,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// No request is made here; an unreachable endpoint surfaces on first use.
    pub fn new(config: Arc<ChainConfig>) -> Self {
        let mut providers: Vec<Arc<dyn Provider + Send + Sync>> = Vec::new();

        providers.push(Arc::new(ProviderBuilder::new().connect_http(config.rpc_url.clone()))
            as Arc<dyn Provider + Send + Sync>);
        for url in &config.failover_urls {
            providers.push(Arc::new(ProviderBuilder::new().connect_http(url.clone()))
                as Arc<dyn Provider + Send + Sync>);
        }

        tracing::info!(
            rpc_url = %config.rpc_url,
            failovers = config.failover_urls.len(),
            "Blockchain client initialized"
        );

        Self {
            timeout_duration: config.rpc_timeout,
            providers,
            config,
        }
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_failover("get_chain_id", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.with_failover("get_block_number", |p| async move { p.get_block_number().await })
            .await
    }

    /// Get the native balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.with_failover("get_balance", |p| async move { p.get_balance(address).await })
            .await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        self.with_failover("get_transaction_receipt", |p| async move {
            p.get_transaction_receipt(tx_hash).await
        })
        .await
    }

    /// Execute a read-only call against a contract and return the raw output.
    pub async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes> {
        let request = TransactionRequest::default().with_to(to).with_input(input);
        self.with_failover("eth_call", |p| {
            let request = request.clone();
            async move { p.call(request).await }
        })
        .await
    }

    /// Run `request` against each provider in order until one answers in time.
    async fn with_failover<T, F, Fut>(
        &self,
        operation: &'static str,
        request: F,
    ) -> BlockchainResult<T>
    where
        F: Fn(Arc<dyn Provider + Send + Sync>) -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, request(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(
                        provider_idx = i,
                        operation,
                        error = %e,
                        "RPC error, trying next provider"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        provider_idx = i,
                        operation,
                        "RPC timeout, trying next provider"
                    );
                }
            }
        }
        metrics::record_rpc_error(operation);
        Err(BlockchainError::Rpc(format!("All RPC providers failed: {}", operation)))
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url.as_str())
            .field("providers", &self.providers.len())
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
