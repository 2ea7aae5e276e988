//! Mint failure kinds and their user-facing messages.

use alloy::primitives::U256;
use thiserror::Error;

use crate::blockchain::types::BlockchainError;
use crate::mint::format::format_ether;

pub const NETWORK_MISMATCH_MESSAGE: &str =
    "The NFTs are minted on Ethereum. Switch to Ethereum and try again.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Why a mint attempt stopped short of completion.
///
/// `Display` is the text shown to the user; the underlying cause, if any,
/// is kept as the error source for logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MintError {
    #[error("{}", NETWORK_MISMATCH_MESSAGE)]
    NetworkMismatch,

    #[error(
        "You have insufficient balance. You need {} ETH (minting fee) to mint an NFT.",
        fee_label(.fee)
    )]
    InsufficientFunds { fee: U256 },

    #[error("{}", GENERIC_ERROR_MESSAGE)]
    TransportFailure(#[source] BlockchainError),

    #[error("The transaction was rejected in your wallet.")]
    UserRejected(#[source] BlockchainError),

    #[error("Connect your wallet to mint.")]
    NotConnected,
}

fn fee_label(fee: &U256) -> String {
    format_ether(*fee)
}

impl MintError {
    /// Classify a failed wallet write.
    pub fn from_write(err: BlockchainError) -> Self {
        match err {
            BlockchainError::Rejected(_) => Self::UserRejected(err),
            other => Self::TransportFailure(other),
        }
    }

    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NetworkMismatch => "network_mismatch",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::TransportFailure(_) => "transport_failure",
            Self::UserRejected(_) => "user_rejected",
            Self::NotConnected => "not_connected",
        }
    }
}
