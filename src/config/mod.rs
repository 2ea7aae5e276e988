//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse, environment overrides)
//!     → validation.rs (semantic checks)
//!     → MinterConfig (validated)
//!     → chain.rs (ChainConfig, immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Environment variables win over file values
//! - No reload: the target chain is fixed for the life of the process

pub mod chain;
pub mod loader;
pub mod schema;
pub mod validation;

pub use chain::{ChainConfig, TargetChain, CONFIRMATION_DEPTH};
pub use loader::{load_config, ConfigError};
pub use schema::{AppMetadata, MinterConfig, NetworkConfig, ObservabilityConfig};
