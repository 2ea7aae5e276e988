//! External capabilities consumed by the mint workflow.
//!
//! The workflow never talks to an RPC endpoint or a wallet directly; it goes
//! through these traits so that any wallet-connection backend can drive it.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::blockchain::types::{BlockchainResult, ChainId, ConfirmationStatus};
use crate::mint::request::Quantity;

/// The user's wallet as seen by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    /// Present only when a wallet is connected.
    pub address: Option<Address>,
    /// Chain currently active in the wallet.
    pub chain_id: ChainId,
}

/// Arguments of a single `mint` contract write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintCall {
    pub quantity: Quantity,
    /// Native currency attached to the call.
    pub value: U256,
}

/// Wallet-connection capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Connected address and active chain.
    async fn account(&self) -> BlockchainResult<Account>;

    /// Ask the wallet to switch its active chain.
    async fn switch_chain(&self, chain_id: ChainId) -> BlockchainResult<()>;

    /// Execute the mint call; resolves once the wallet has broadcast it.
    async fn write_mint(&self, call: MintCall) -> BlockchainResult<TxHash>;

    /// Follow a transaction until `confirmations` blocks deep.
    fn watch_confirmations(&self, tx_hash: TxHash, confirmations: u64) -> ConfirmationSubscription;
}

/// Chain read capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Native-currency balance of `address`.
    async fn get_balance(&self, address: Address) -> BlockchainResult<U256>;

    /// Current mint fee as reported by the contract.
    async fn get_mint_fee(&self) -> BlockchainResult<U256>;
}

#[async_trait]
impl<T: WalletConnector + ?Sized> WalletConnector for Arc<T> {
    async fn account(&self) -> BlockchainResult<Account> {
        (**self).account().await
    }

    async fn switch_chain(&self, chain_id: ChainId) -> BlockchainResult<()> {
        (**self).switch_chain(chain_id).await
    }

    async fn write_mint(&self, call: MintCall) -> BlockchainResult<TxHash> {
        (**self).write_mint(call).await
    }

    fn watch_confirmations(&self, tx_hash: TxHash, confirmations: u64) -> ConfirmationSubscription {
        (**self).watch_confirmations(tx_hash, confirmations)
    }
}

#[async_trait]
impl<T: ChainReader + ?Sized> ChainReader for Arc<T> {
    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        (**self).get_balance(address).await
    }

    async fn get_mint_fee(&self) -> BlockchainResult<U256> {
        (**self).get_mint_fee().await
    }
}

/// Stream of confirmation updates for one transaction.
///
/// Dropping or cancelling the subscription stops the producer; it never
/// affects the transaction itself.
#[derive(Debug)]
pub struct ConfirmationSubscription {
    updates: mpsc::Receiver<ConfirmationStatus>,
    task: Option<JoinHandle<()>>,
}

impl ConfirmationSubscription {
    /// Subscription fed by a background task.
    pub fn new(updates: mpsc::Receiver<ConfirmationStatus>, task: JoinHandle<()>) -> Self {
        Self {
            updates,
            task: Some(task),
        }
    }

    /// Subscription fed by an externally owned sender.
    pub fn from_receiver(updates: mpsc::Receiver<ConfirmationStatus>) -> Self {
        Self {
            updates,
            task: None,
        }
    }

    /// Subscription replaying a fixed sequence of updates, then ending.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ConfirmationStatus>,
    {
        let statuses: Vec<_> = statuses.into_iter().collect();
        let (tx, rx) = mpsc::channel(statuses.len().max(1));
        for status in statuses {
            // Capacity covers every item.
            let _ = tx.try_send(status);
        }
        Self::from_receiver(rx)
    }

    /// Next update, or `None` once the producer is gone.
    pub async fn next(&mut self) -> Option<ConfirmationStatus> {
        self.updates.recv().await
    }

    /// Stop receiving updates.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.updates.close();
    }
}

impl Drop for ConfirmationSubscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
