//! NFT minting client library.
//!
//! [`mint::MintWorkflow`] drives a single mint attempt against the wallet
//! and chain capabilities in [`mint::capabilities`]; [`blockchain`] provides
//! JSON-RPC implementations of those capabilities and [`config`] the
//! process-wide [`config::ChainConfig`].

pub mod blockchain;
pub mod config;
pub mod mint;
pub mod observability;

pub use config::{ChainConfig, MinterConfig};
pub use mint::{MintState, MintView, MintWorkflow, Quantity};
