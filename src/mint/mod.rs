//! NFT mint workflow.
//!
//! # Data Flow
//! ```text
//! presentation → MintWorkflow::submit(quantity)
//!     → WalletConnector::account (chain guard, optional switch)
//!     → ChainReader::{get_balance, get_mint_fee} (joined)
//!     → funds guard (reducer)
//!     → WalletConnector::write_mint
//!     → WalletConnector::watch_confirmations (depth 3)
//!     → MintState published on a watch channel → MintView
//! ```

pub mod capabilities;
pub mod error;
pub mod format;
pub mod request;
pub mod state;
pub mod view;
pub mod workflow;

pub use capabilities::{Account, ChainReader, ConfirmationSubscription, MintCall, WalletConnector};
pub use error::MintError;
pub use request::{ConfirmationState, MintRequest, Quantity};
pub use state::{MintEvent, MintState};
pub use view::{ButtonStyle, MintView};
pub use workflow::MintWorkflow;
