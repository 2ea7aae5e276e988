//! Mint workflow driver.
//!
//! # Responsibilities
//! - Guard the target chain and the user's funds before any write
//! - Submit exactly one mint per accepted attempt
//! - Follow the transaction to the configured confirmation depth
//! - Publish every transition on a watch channel for the presentation layer
//!
//! # Design Decisions
//! - State lives in one `MintState` value updated only through the reducer
//! - Errors never escape `submit`; they end up in the state's message slot
//! - No retries: every retry is a fresh `submit`
//! - `close` bumps a generation counter; an attempt that observes a newer
//!   generation stops publishing and drops its confirmation subscription
//! - A wallet write that is still awaiting the user outlives `close`; no new
//!   attempt starts until it resolves

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::blockchain::types::{BlockchainError, ConfirmationStatus};
use crate::config::ChainConfig;
use crate::mint::capabilities::{ChainReader, MintCall, WalletConnector};
use crate::mint::request::{ConfirmationState, MintRequest, Quantity};
use crate::mint::state::{MintEvent, MintState};
use crate::mint::view::MintView;
use crate::observability::metrics;

/// One user's mint interaction.
pub struct MintWorkflow<W, R> {
    wallet: W,
    reader: R,
    config: Arc<ChainConfig>,
    state: watch::Sender<MintState>,
    generation: watch::Sender<u64>,
    /// Set while `write_mint` is outstanding, independent of the dialog.
    write_pending: AtomicBool,
}

/// Clears the write-pending flag however the write ends.
struct PendingWrite<'a>(&'a AtomicBool);

impl Drop for PendingWrite<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<W, R> MintWorkflow<W, R>
where
    W: WalletConnector,
    R: ChainReader,
{
    pub fn new(wallet: W, reader: R, config: Arc<ChainConfig>) -> Self {
        let (state, _) = watch::channel(MintState::Idle);
        let (generation, _) = watch::channel(0);
        Self {
            wallet,
            reader,
            config,
            state,
            generation,
            write_pending: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> MintState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published transition.
    pub fn subscribe(&self) -> watch::Receiver<MintState> {
        self.state.subscribe()
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// The wallet is still deciding on a mint transaction.
    pub fn write_pending(&self) -> bool {
        self.write_pending.load(Ordering::SeqCst)
    }

    /// Presentation of the current state.
    pub fn view(&self, paused: bool) -> MintView {
        MintView::derive(&self.state(), paused, self.write_pending(), self.config.target)
    }

    /// Run one mint attempt and return the state it settled in.
    ///
    /// Ignored (returns the current state) while another attempt is in flight.
    pub async fn submit(&self, quantity: Quantity) -> MintState {
        let mut dismissed = self.generation.subscribe();
        let generation = *dismissed.borrow_and_update();

        let mut started = false;
        self.state.send_if_modified(|state| {
            if state.is_in_flight() || self.write_pending() {
                return false;
            }
            *state = std::mem::take(state).apply(MintEvent::Submitted);
            started = true;
            true
        });
        if !started {
            tracing::warn!("Mint already in progress; ignoring submit");
            return self.state();
        }

        let mut request = MintRequest::new(quantity, self.config.target_chain_id());
        tracing::info!(
            quantity = quantity.get(),
            chain_id = request.target_chain.0,
            "Mint submitted"
        );

        self.run(generation, &mut dismissed, &mut request).await;

        let state = self.state();
        metrics::record_mint_attempt(state.outcome());
        tracing::info!(
            outcome = state.outcome(),
            tx_hash = ?request.tx_hash,
            confirmation = ?request.confirmation,
            "Mint attempt finished"
        );
        state
    }

    /// Dismiss the result dialog and return to `Idle`.
    ///
    /// A transaction that was already broadcast stays on chain; only the
    /// tracking of it stops.
    pub fn close(&self) {
        self.generation.send_modify(|g| *g += 1);
        self.state.send_modify(|state| {
            tracing::debug!(from = ?state, "Mint dialog closed");
            *state = std::mem::take(state).apply(MintEvent::Dismissed);
        });
    }

    async fn run(
        &self,
        generation: u64,
        dismissed: &mut watch::Receiver<u64>,
        request: &mut MintRequest,
    ) {
        // Step 1: wallet and network.
        let account = match self.wallet.account().await {
            Ok(account) => account,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read wallet account");
                self.dispatch(generation, MintEvent::ReadFailed(e));
                return;
            }
        };
        let Some(address) = account.address else {
            self.dispatch(generation, MintEvent::NotConnected);
            return;
        };

        let target = request.target_chain;
        if account.chain_id != target {
            tracing::warn!(
                wallet_chain = account.chain_id.0,
                target_chain = target.0,
                "Wallet is on the wrong chain"
            );
            if !self.dispatch(generation, MintEvent::NetworkMismatched) {
                return;
            }
            match self.wallet.switch_chain(target).await {
                Ok(()) => {
                    metrics::record_chain_switch(true);
                    tracing::info!(chain_id = target.0, "Wallet switched chain");
                }
                Err(e) => {
                    metrics::record_chain_switch(false);
                    tracing::warn!(error = %e, "Switching chains failed");
                    self.dispatch(generation, MintEvent::SwitchFailed);
                }
            }
            return;
        }
        if !self.dispatch(generation, MintEvent::NetworkMatched) {
            return;
        }

        // Step 2: balance and fee, independently.
        let (balance, fee) = tokio::join!(
            self.reader.get_balance(address),
            self.reader.get_mint_fee()
        );
        let (balance, fee) = match (balance, fee) {
            (Ok(balance), Ok(fee)) => (balance, fee),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(error = %e, "Failed to read balance or mint fee");
                self.dispatch(generation, MintEvent::ReadFailed(e));
                return;
            }
        };
        tracing::debug!(%balance, %fee, "Read balance and mint fee");

        // Step 3: funds guard (inside the reducer).
        if !self.dispatch(generation, MintEvent::ReadsCompleted { balance, fee }) {
            return;
        }
        if !matches!(self.state(), MintState::AwaitingUserConfirmation { .. }) {
            tracing::info!(%balance, %fee, "Insufficient balance for mint fee");
            return;
        }

        // Step 4: write.
        let call = MintCall {
            quantity: request.quantity,
            value: fee,
        };
        self.write_pending.store(true, Ordering::SeqCst);
        let pending = PendingWrite(&self.write_pending);
        let written = self.wallet.write_mint(call).await;
        drop(pending);
        let tx_hash = match written {
            Ok(tx_hash) => tx_hash,
            Err(e) => {
                tracing::error!(error = %e, "Mint transaction failed");
                self.dispatch(generation, MintEvent::WriteFailed(e));
                return;
            }
        };
        if let Err(e) = request.submitted(tx_hash) {
            tracing::warn!(error = %e, "Unexpected request state");
        }
        tracing::info!(%tx_hash, "Mint transaction broadcast");
        if !self.dispatch(generation, MintEvent::WriteAccepted { tx_hash }) {
            return;
        }

        // Step 5: confirmations.
        let required = self.config.confirmations;
        let mut subscription = self.wallet.watch_confirmations(tx_hash, required);
        loop {
            let status = tokio::select! {
                biased;
                _ = dismissed.changed() => {
                    subscription.cancel();
                    tracing::debug!(%tx_hash, "Stopped tracking dismissed mint");
                    return;
                }
                status = subscription.next() => status,
            };

            let (next, depth) = match status {
                Some(ConfirmationStatus::Pending) => continue,
                Some(ConfirmationStatus::Confirming { current, .. }) => {
                    let next = if current >= required {
                        ConfirmationState::Confirmed
                    } else {
                        ConfirmationState::Confirming
                    };
                    (next, current)
                }
                Some(ConfirmationStatus::Confirmed { block_number }) => {
                    tracing::debug!(%tx_hash, block_number, "Watcher reported confirmation");
                    (ConfirmationState::Confirmed, required)
                }
                Some(ConfirmationStatus::Failed(reason)) => {
                    let _ = request.advance(ConfirmationState::Failed);
                    self.dispatch(
                        generation,
                        MintEvent::TrackingFailed(BlockchainError::Reverted(reason)),
                    );
                    return;
                }
                None => {
                    let _ = request.advance(ConfirmationState::Failed);
                    self.dispatch(
                        generation,
                        MintEvent::TrackingFailed(BlockchainError::NotAvailable(
                            "confirmation subscription ended".to_string(),
                        )),
                    );
                    return;
                }
            };
            metrics::record_confirmations(depth);
            if let Err(e) = request.advance(next) {
                tracing::debug!(error = %e, "Ignoring confirmation update");
            }
            if !self.dispatch(generation, MintEvent::ConfirmationsReached { depth, required }) {
                return;
            }
            if !self.state().is_in_flight() {
                return;
            }
        }
    }

    /// Apply `event` unless the attempt was dismissed. Returns whether the
    /// attempt is still live.
    fn dispatch(&self, generation: u64, event: MintEvent) -> bool {
        let mut live = false;
        self.state.send_if_modified(|state| {
            if *self.generation.borrow() != generation {
                return false;
            }
            live = true;
            let next = std::mem::take(state).apply(event);
            let changed = *state != next;
            *state = next;
            changed
        });
        live
    }
}
