//! Transaction confirmation monitoring.
//!
//! # Responsibilities
//! - Poll for the receipt of a broadcast transaction
//! - Count confirmations against the latest block
//! - Report progress as a stream of `ConfirmationStatus`
//!
//! Depth counts the inclusion block as the first confirmation, so a
//! transaction mined in the latest block has one confirmation.

use alloy::primitives::TxHash;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainResult, ConfirmationStatus};
use crate::mint::capabilities::ConfirmationSubscription;

/// Confirmation depth of a transaction included at `tx_block` when the chain
/// head is `current_block`.
pub fn confirmation_depth(tx_block: u64, current_block: u64) -> u64 {
    current_block.saturating_sub(tx_block) + 1
}

/// Polls receipts on a fixed interval.
#[derive(Debug, Clone)]
pub struct ReceiptWatcher {
    client: BlockchainClient,
    poll_interval: Duration,
}

impl ReceiptWatcher {
    pub fn new(client: BlockchainClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }

    /// Start watching `tx_hash` in a background task.
    ///
    /// The task ends after `Confirmed` or `Failed`, or when the subscription
    /// is dropped. There is no overall deadline.
    pub fn spawn(&self, tx_hash: TxHash, required: u64) -> ConfirmationSubscription {
        let (tx, rx) = mpsc::channel(16);
        let watcher = self.clone();

        let task = tokio::spawn(async move {
            let mut last: Option<ConfirmationStatus> = None;
            let mut ticker = interval(watcher.poll_interval);

            loop {
                ticker.tick().await;

                let status = match watcher.poll(tx_hash, required).await {
                    Ok(status) => status,
                    Err(e) => {
                        tracing::warn!(
                            tx_hash = %tx_hash,
                            error = %e,
                            "Confirmation polling failed"
                        );
                        ConfirmationStatus::Failed(e.to_string())
                    }
                };

                let terminal = matches!(
                    status,
                    ConfirmationStatus::Confirmed { .. } | ConfirmationStatus::Failed(_)
                );
                if last.as_ref() != Some(&status) {
                    last = Some(status.clone());
                    if tx.send(status).await.is_err() {
                        tracing::debug!(tx_hash = %tx_hash, "Confirmation subscriber gone");
                        return;
                    }
                }
                if terminal {
                    return;
                }
            }
        });

        ConfirmationSubscription::new(rx, task)
    }

    /// One polling round.
    async fn poll(&self, tx_hash: TxHash, required: u64) -> BlockchainResult<ConfirmationStatus> {
        let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
            Some(r) => r,
            None => {
                tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                return Ok(ConfirmationStatus::Pending);
            }
        };

        if !receipt.status() {
            return Ok(ConfirmationStatus::Failed("Transaction reverted".to_string()));
        }

        let current_block = self.client.get_block_number().await?;
        let tx_block = receipt.block_number.unwrap_or(current_block);
        let confirmations = confirmation_depth(tx_block, current_block);

        if confirmations >= required {
            return Ok(ConfirmationStatus::Confirmed {
                block_number: tx_block,
            });
        }

        tracing::debug!(
            tx_hash = %tx_hash,
            confirmations = confirmations,
            required = required,
            "Waiting for confirmations"
        );
        Ok(ConfirmationStatus::Confirming {
            current: confirmations,
            required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChainConfig, MinterConfig};
    use std::sync::Arc;

    #[test]
    fn test_confirmation_depth() {
        assert_eq!(confirmation_depth(100, 100), 1);
        assert_eq!(confirmation_depth(100, 102), 3);
        // Head behind a freshly seen receipt on a lagging node.
        assert_eq!(confirmation_depth(100, 99), 1);
    }

    #[tokio::test]
    async fn test_unreachable_rpc_reports_failure() {
        let mut config = MinterConfig::default();
        config.network.rpc_url = "http://127.0.0.1:1".to_string();
        config.network.rpc_timeout_secs = 1;
        config.contract.address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string();
        let chain = Arc::new(ChainConfig::from_config(&config).unwrap());

        let watcher = ReceiptWatcher::new(
            BlockchainClient::new(chain),
            Duration::from_millis(10),
        );
        let mut sub = watcher.spawn(TxHash::ZERO, 3);

        assert!(matches!(sub.next().await, Some(ConfirmationStatus::Failed(_))));
        assert_eq!(sub.next().await, None);
    }
}
