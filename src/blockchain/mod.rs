//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key) + ChainConfig (RPC URL, contract)
//!     → wallet.rs (key loading)
//!     → client.rs (RPC reads with timeouts and failover)
//!     → contract.rs (getFee / mint bindings, ChainReader)
//!     → connector.rs (signing provider, WalletConnector)
//!     → transaction.rs (receipt polling until confirmed)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod connector;
pub mod contract;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use connector::RpcWalletConnector;
pub use contract::NftContract;
pub use transaction::ReceiptWatcher;
pub use types::{BlockchainError, ChainId, ConfirmationStatus};
pub use wallet::Wallet;
