//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for marketplace value types.
#[derive(Debug, Error, PartialEq)]
pub enum EstateError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("invalid chain id: {0}")]
    InvalidChainId(String),

    #[error("invalid listing: {reason}")]
    InvalidListing { reason: String },

    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}
