//! Mint workflow state machine.
//!
//! # States
//! ```text
//! Idle → AwaitingNetworkCheck → AwaitingReads → AwaitingUserConfirmation
//!      → AwaitingChainConfirmations → Completed
//!
//! AwaitingNetworkCheck → NetworkMismatch | TransactionError
//! AwaitingReads        → InsufficientFunds | TransactionError
//! AwaitingUserConfirmation, AwaitingChainConfirmations → TransactionError
//!
//! any → Idle (dismissed)
//! ```
//!
//! All transitions go through [`MintState::apply`]; events that make no
//! sense in the current state are ignored.

use alloy::primitives::{TxHash, U256};

use crate::blockchain::types::BlockchainError;
use crate::mint::error::{MintError, NETWORK_MISMATCH_MESSAGE};
use crate::mint::request::ConfirmationState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MintState {
    #[default]
    Idle,
    AwaitingNetworkCheck,
    AwaitingReads,
    /// Wallet is asked to approve a call carrying `fee`.
    AwaitingUserConfirmation { fee: U256 },
    AwaitingChainConfirmations { tx_hash: TxHash, confirmations: u64 },
    Completed { tx_hash: TxHash },
    /// `dialog_visible` drops to false once a corrective switch has failed.
    NetworkMismatch { dialog_visible: bool },
    InsufficientFunds { fee: U256 },
    /// `tx_hash` is set when the failure happened after broadcast.
    TransactionError {
        error: MintError,
        tx_hash: Option<TxHash>,
    },
}

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintEvent {
    Submitted,
    NotConnected,
    NetworkMatched,
    NetworkMismatched,
    SwitchFailed,
    ReadsCompleted { balance: U256, fee: U256 },
    ReadFailed(BlockchainError),
    WriteAccepted { tx_hash: TxHash },
    WriteFailed(BlockchainError),
    ConfirmationsReached { depth: u64, required: u64 },
    TrackingFailed(BlockchainError),
    Dismissed,
}

impl MintState {
    /// Pure transition function.
    pub fn apply(self, event: MintEvent) -> MintState {
        use MintEvent as E;
        use MintState as S;

        match (self, event) {
            (_, E::Dismissed) => S::Idle,

            (state, E::Submitted) if !state.is_in_flight() => S::AwaitingNetworkCheck,

            (S::AwaitingNetworkCheck, E::NotConnected) => S::TransactionError {
                error: MintError::NotConnected,
                tx_hash: None,
            },
            (S::AwaitingNetworkCheck, E::NetworkMatched) => S::AwaitingReads,
            (S::AwaitingNetworkCheck, E::NetworkMismatched) => S::NetworkMismatch {
                dialog_visible: true,
            },
            (S::AwaitingNetworkCheck, E::ReadFailed(e)) => S::TransactionError {
                error: MintError::TransportFailure(e),
                tx_hash: None,
            },
            (S::NetworkMismatch { .. }, E::SwitchFailed) => S::NetworkMismatch {
                dialog_visible: false,
            },

            (S::AwaitingReads, E::ReadsCompleted { balance, fee }) => {
                if balance < fee {
                    S::InsufficientFunds { fee }
                } else {
                    S::AwaitingUserConfirmation { fee }
                }
            }
            (S::AwaitingReads, E::ReadFailed(e)) => S::TransactionError {
                error: MintError::TransportFailure(e),
                tx_hash: None,
            },

            (S::AwaitingUserConfirmation { .. }, E::WriteAccepted { tx_hash }) => {
                S::AwaitingChainConfirmations {
                    tx_hash,
                    confirmations: 0,
                }
            }
            (S::AwaitingUserConfirmation { .. }, E::WriteFailed(e)) => S::TransactionError {
                error: MintError::from_write(e),
                tx_hash: None,
            },

            (
                S::AwaitingChainConfirmations { tx_hash, .. },
                E::ConfirmationsReached { depth, required },
            ) => {
                if depth >= required {
                    S::Completed { tx_hash }
                } else {
                    S::AwaitingChainConfirmations {
                        tx_hash,
                        confirmations: depth,
                    }
                }
            }
            (S::AwaitingChainConfirmations { tx_hash, .. }, E::TrackingFailed(e)) => {
                S::TransactionError {
                    error: MintError::TransportFailure(e),
                    tx_hash: Some(tx_hash),
                }
            }

            (state, event) => {
                tracing::debug!(?state, ?event, "Ignoring event");
                state
            }
        }
    }

    /// A mint attempt is running; new submissions are refused.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::AwaitingNetworkCheck
                | Self::AwaitingReads
                | Self::AwaitingUserConfirmation { .. }
                | Self::AwaitingChainConfirmations { .. }
        )
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Message for the single user-visible error slot.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::NetworkMismatch {
                dialog_visible: true,
            } => Some(NETWORK_MISMATCH_MESSAGE.to_string()),
            Self::InsufficientFunds { fee } => {
                Some(MintError::InsufficientFunds { fee: *fee }.to_string())
            }
            Self::TransactionError { error, .. } => Some(error.to_string()),
            _ => None,
        }
    }

    /// Confirmation progress implied by this state.
    pub fn confirmation_state(&self) -> ConfirmationState {
        match self {
            Self::AwaitingChainConfirmations { confirmations: 0, .. } => ConfirmationState::Pending,
            Self::AwaitingChainConfirmations { .. } => ConfirmationState::Confirming,
            Self::Completed { .. } => ConfirmationState::Confirmed,
            Self::TransactionError {
                tx_hash: Some(_), ..
            } => ConfirmationState::Failed,
            _ => ConfirmationState::NotSubmitted,
        }
    }

    /// Label for the attempt outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Idle => "dismissed",
            Self::Completed { .. } => "completed",
            Self::NetworkMismatch { .. } => "network_mismatch",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::TransactionError { error, .. } => error.kind(),
            _ => "in_flight",
        }
    }
}
