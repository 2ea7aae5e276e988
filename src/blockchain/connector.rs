//! Wallet connection backed by a local key and a JSON-RPC endpoint.
//!
//! The endpoint is pinned to one network, so `switch_chain` can only succeed
//! when the endpoint already serves the requested chain.

use std::sync::Arc;

use alloy::network::TransactionBuilder;
use alloy::primitives::TxHash;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::contract::encode_mint;
use crate::blockchain::transaction::ReceiptWatcher;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::wallet::Wallet;
use crate::mint::capabilities::{Account, ConfirmationSubscription, MintCall, WalletConnector};

pub struct RpcWalletConnector {
    client: BlockchainClient,
    signer: Arc<dyn Provider + Send + Sync>,
    wallet: Wallet,
    watcher: ReceiptWatcher,
}

impl RpcWalletConnector {
    pub fn new(client: BlockchainClient, wallet: Wallet) -> Self {
        let config = client.config();
        let signer = Arc::new(
            ProviderBuilder::new()
                .wallet(wallet.ethereum_wallet())
                .connect_http(config.rpc_url.clone()),
        ) as Arc<dyn Provider + Send + Sync>;
        let watcher = ReceiptWatcher::new(client.clone(), config.poll_interval);

        Self {
            client,
            signer,
            wallet,
            watcher,
        }
    }
}

/// Wallets and nodes report user refusal with free-form text.
fn classify_send_error(message: String) -> BlockchainError {
    let lower = message.to_lowercase();
    if lower.contains("rejected") || lower.contains("denied") {
        BlockchainError::Rejected(message)
    } else {
        BlockchainError::Rpc(message)
    }
}

#[async_trait]
impl WalletConnector for RpcWalletConnector {
    async fn account(&self) -> BlockchainResult<Account> {
        let chain_id = self.client.get_chain_id().await?;
        Ok(Account {
            address: Some(self.wallet.address()),
            chain_id,
        })
    }

    async fn switch_chain(&self, chain_id: ChainId) -> BlockchainResult<()> {
        let current = self.client.get_chain_id().await?;
        if current == chain_id {
            return Ok(());
        }
        Err(BlockchainError::ChainMismatch {
            expected: chain_id.0,
            actual: current.0,
        })
    }

    async fn write_mint(&self, call: MintCall) -> BlockchainResult<TxHash> {
        let config = self.client.config();
        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(config.contract_address)
            .with_value(call.value)
            .with_input(encode_mint(call.quantity.get()));

        tracing::info!(
            contract = %config.contract_address,
            quantity = call.quantity.get(),
            value = %call.value,
            "Sending mint transaction"
        );

        match timeout(config.rpc_timeout, self.signer.send_transaction(tx)).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(classify_send_error(e.to_string())),
            Err(_) => Err(BlockchainError::Timeout(config.rpc_timeout.as_secs())),
        }
    }

    fn watch_confirmations(&self, tx_hash: TxHash, confirmations: u64) -> ConfirmationSubscription {
        self.watcher.spawn(tx_hash, confirmations)
    }
}

impl std::fmt::Debug for RpcWalletConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWalletConnector")
            .field("address", &self.wallet.address())
            .field("client", &self.client)
            .finish()
    }
}
