//! Contract-specific error types
//!
//! Error taxonomy for the exchange ledger and its collaborators. Every
//! variant is returned synchronously and aborts the whole operation.

use thiserror::Error;
use types::numeric::Amount;

/// Exchange ledger errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Arithmetic overflow in exchange calculation")]
    Overflow,

    #[error("Not enough tokens in pool: required {required}, available {available}")]
    InsufficientPoolTokens { required: Amount, available: Amount },

    #[error("Not enough currency in pool: required {required}, available {available}")]
    InsufficientPoolCurrency { required: Amount, available: Amount },

    #[error("Caller token balance too low: required {required}, available {available}")]
    InsufficientCallerTokenBalance { required: Amount, available: Amount },

    #[error("Token transfer not authorized: required allowance {required}, granted {allowed}")]
    TransferNotAuthorized { required: Amount, allowed: Amount },

    #[error("Unauthorized: caller is not the administrator")]
    NotAdministrator,

    #[error("Nothing to withdraw: currency reserve is empty")]
    InsufficientBalanceToWithdraw,

    #[error("Token transfer failed: {0}")]
    Token(#[from] TokenError),

    #[error("Currency payment failed: {0}")]
    PaymentFailed(#[from] PaymentError),

    #[error("Rollback failed after payment error ({payment}): {token}")]
    RollbackFailed {
        payment: PaymentError,
        token: TokenError,
    },

    #[error("Ledger lock poisoned by a panicked caller")]
    LockPoisoned,
}

/// Fungible token ledger errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient token balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("Insufficient allowance: required {required}, allowed {allowed}")]
    InsufficientAllowance { required: Amount, allowed: Amount },

    #[error("Arithmetic overflow in token balance")]
    Overflow,
}

/// Native currency payment errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Recipient {recipient} rejected the payment")]
    Rejected { recipient: String },

    #[error("Payment rail unavailable")]
    Unavailable,

    #[error("Arithmetic overflow in recipient balance")]
    Overflow,
}

/// Construction and configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Token collaborator {actual} does not match configured token contract {expected}")]
    TokenMismatch { expected: String, actual: String },
}
