//! Custodial Exchange Ledger
//!
//! A fixed-rate exchange between a pre-funded token pool and a native
//! currency pool. Callers deposit currency for tokens or redeem tokens for
//! currency; a single administrator may drain the accumulated currency.
//!
//! # Modules
//! - `portfolio`: Reserves, deposit and redeem
//! - `admin`: Administrator gate, drain, ownership transfer
//! - `token`: Fungible token collaborator trait and in-memory token
//! - `payment`: Currency payment collaborator trait and in-memory wallet book
//! - `shared`: Mutex-guarded handle for multi-threaded callers
//! - `config`: Construction-time configuration
//! - `events`: Notifications emitted by committed operations
//! - `errors`: Contract-specific error types
//!
//! # Version
//! v0.1.0

pub mod admin;
pub mod config;
pub mod errors;
pub mod events;
pub mod payment;
pub mod portfolio;
pub mod shared;
pub mod token;

pub use admin::AdminGate;
pub use config::PortfolioConfig;
pub use errors::{ConfigError, ExchangeError, PaymentError, TokenError};
pub use payment::{NativeBank, PaymentRail};
pub use portfolio::{CallContext, PoolState, Portfolio};
pub use shared::SharedPortfolio;
pub use token::{FungibleToken, TokenLedger};

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
