//! Presentation state derived from the workflow.
//!
//! Everything here is a pure function of [`MintState`], the external pause
//! flag and whether a wallet write is still outstanding, so any front end can
//! render the dialog and the trigger without keeping flags of its own.

use serde::Serialize;

use crate::config::TargetChain;
use crate::mint::format::format_ether;
use crate::mint::state::MintState;

/// How the mint trigger should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ButtonStyle {
    Active,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintView {
    pub dialog_open: bool,
    pub title: Option<&'static str>,
    pub body: Vec<String>,
    pub show_spinner: bool,
    pub submit_enabled: bool,
    pub button_style: ButtonStyle,
}

impl MintView {
    /// `write_pending` survives a dismissed dialog, so the trigger stays
    /// disabled until the wallet answers.
    pub fn derive(
        state: &MintState,
        paused: bool,
        write_pending: bool,
        chain: TargetChain,
    ) -> Self {
        let button_style = if paused {
            ButtonStyle::Paused
        } else {
            ButtonStyle::Active
        };
        let submit_enabled = !paused && !write_pending && !state.is_in_flight();

        let (dialog_open, title, body, show_spinner) = match state {
            MintState::Idle => (false, None, Vec::new(), false),
            MintState::AwaitingNetworkCheck | MintState::AwaitingReads => {
                (true, Some("Minting NFT"), Vec::new(), false)
            }
            MintState::AwaitingUserConfirmation { fee } => (
                true,
                Some("Minting NFT"),
                vec![
                    "Confirm transaction in your wallet.".to_string(),
                    format!(
                        "A {} {} minting fee and transaction fees will be applied.",
                        format_ether(*fee),
                        chain.currency()
                    ),
                ],
                false,
            ),
            MintState::AwaitingChainConfirmations { .. } => (
                true,
                Some("Minting NFT"),
                vec!["Minting your NFT...".to_string()],
                true,
            ),
            MintState::Completed { .. } => (
                true,
                Some("Minting NFT"),
                vec![
                    "Mint Successful!".to_string(),
                    format!(
                        "Please be patient. It might take a few minutes until the NFT is \
                         minted and appears on {}.",
                        chain.name()
                    ),
                ],
                false,
            ),
            MintState::NetworkMismatch { .. }
            | MintState::InsufficientFunds { .. }
            | MintState::TransactionError { .. } => match state.error_message() {
                Some(message) => (true, Some("Error"), vec![message], false),
                None => (false, None, Vec::new(), false),
            },
        };

        Self {
            dialog_open,
            title,
            body,
            show_spinner,
            submit_enabled,
            button_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mint::error::MintError;
    use alloy::primitives::utils::parse_ether;
    use alloy::primitives::TxHash;

    #[test]
    fn test_idle_view() {
        let view = MintView::derive(&MintState::Idle, false, false, TargetChain::Mainnet);
        assert!(!view.dialog_open);
        assert!(view.submit_enabled);
        assert_eq!(view.button_style, ButtonStyle::Active);
    }

    #[test]
    fn test_paused_disables_submit() {
        let view = MintView::derive(&MintState::Idle, true, false, TargetChain::Mainnet);
        assert!(!view.submit_enabled);
        assert_eq!(view.button_style, ButtonStyle::Paused);
    }

    #[test]
    fn test_in_flight_disables_submit() {
        let state = MintState::AwaitingChainConfirmations {
            tx_hash: TxHash::ZERO,
            confirmations: 1,
        };
        let view = MintView::derive(&state, false, false, TargetChain::Mainnet);
        assert!(!view.submit_enabled);
        assert!(view.show_spinner);
        assert_eq!(view.body, vec!["Minting your NFT...".to_string()]);
    }

    #[test]
    fn test_confirmation_prompt_shows_fee() {
        let state = MintState::AwaitingUserConfirmation {
            fee: parse_ether("0.2").unwrap(),
        };
        let view = MintView::derive(&state, false, false, TargetChain::Sepolia);
        assert_eq!(view.title, Some("Minting NFT"));
        assert!(view.body[1].starts_with("A 0.200 ETH minting fee"));
    }

    #[test]
    fn test_outstanding_write_disables_submit_after_close() {
        let view = MintView::derive(&MintState::Idle, false, true, TargetChain::Mainnet);
        assert!(!view.dialog_open);
        assert!(!view.submit_enabled);
        assert_eq!(view.button_style, ButtonStyle::Active);
    }

    #[test]
    fn test_error_view() {
        let state = MintState::TransactionError {
            error: MintError::NotConnected,
            tx_hash: None,
        };
        let view = MintView::derive(&state, false, false, TargetChain::Mainnet);
        assert!(view.dialog_open);
        assert_eq!(view.title, Some("Error"));
        assert!(view.submit_enabled);
    }

    #[test]
    fn test_suppressed_mismatch_keeps_dialog_closed() {
        let state = MintState::NetworkMismatch {
            dialog_visible: false,
        };
        let view = MintView::derive(&state, false, false, TargetChain::Mainnet);
        assert!(!view.dialog_open);
        assert!(view.body.is_empty());
    }

    #[test]
    fn test_completed_view_names_chain() {
        let state = MintState::Completed { tx_hash: TxHash::ZERO };
        let view = MintView::derive(&state, false, false, TargetChain::Mainnet);
        assert_eq!(view.body[0], "Mint Successful!");
        assert!(view.body[1].ends_with("appears on Ethereum."));
    }
}
