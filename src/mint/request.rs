//! Per-attempt mint data.

use std::num::NonZeroU32;
use std::str::FromStr;

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::blockchain::types::ChainId;

/// Number of NFTs to mint. Never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("quantity must be a positive integer, got '{0}'")]
pub struct InvalidQuantity(pub String);

impl Quantity {
    pub const ONE: Self = Self(NonZeroU32::MIN);

    pub fn new(n: u32) -> Result<Self, InvalidQuantity> {
        NonZeroU32::new(n)
            .map(Self)
            .ok_or_else(|| InvalidQuantity(n.to_string()))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One less, stopping at one.
    pub fn decrement(self) -> Self {
        NonZeroU32::new(self.get() - 1).map_or(self, Self)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = InvalidQuantity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(|n| Self::new(n).ok())
            .ok_or_else(|| InvalidQuantity(s.to_string()))
    }
}

/// Progress of a submitted transaction towards finality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    NotSubmitted,
    Pending,
    Confirming,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal confirmation transition {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: ConfirmationState,
    pub to: ConfirmationState,
}

impl ConfirmationState {
    /// Forward-only; `Failed` only from `Pending` or `Confirming`.
    pub fn can_advance_to(self, next: ConfirmationState) -> bool {
        use ConfirmationState::*;
        matches!(
            (self, next),
            (NotSubmitted, Pending)
                | (Pending, Pending | Confirming | Confirmed | Failed)
                | (Confirming, Confirming | Confirmed | Failed)
        )
    }
}

/// A single user-initiated mint attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub quantity: Quantity,
    pub target_chain: ChainId,
    pub tx_hash: Option<TxHash>,
    pub confirmation: ConfirmationState,
}

impl MintRequest {
    pub fn new(quantity: Quantity, target_chain: ChainId) -> Self {
        Self {
            quantity,
            target_chain,
            tx_hash: None,
            confirmation: ConfirmationState::NotSubmitted,
        }
    }

    /// Record the broadcast transaction.
    pub fn submitted(&mut self, tx_hash: TxHash) -> Result<(), InvalidTransition> {
        self.advance(ConfirmationState::Pending)?;
        self.tx_hash = Some(tx_hash);
        Ok(())
    }

    pub fn advance(&mut self, next: ConfirmationState) -> Result<(), InvalidTransition> {
        if !self.confirmation.can_advance_to(next) {
            return Err(InvalidTransition {
                from: self.confirmation,
                to: next,
            });
        }
        self.confirmation = next;
        Ok(())
    }
}
