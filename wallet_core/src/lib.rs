//! Wallet side of TokenEstate.
//!
//! - [`WalletProvider`]: the boundary to whatever holds the user's keys
//! - [`JsonRpcWallet`]: a provider backed by an Ethereum JSON-RPC endpoint
//! - [`connect_wallet`]: login by requesting the provider's accounts
//! - [`PaymentGateway`]: the share payment flow and its [`PaymentAttempt`] state

pub mod error;
pub mod json_rpc;
pub mod payment;
pub mod provider;

pub use error::WalletError;
pub use json_rpc::JsonRpcWallet;
pub use payment::{
    Completed, PaymentAttempt, PaymentConfig, PaymentGateway, PaymentStep, DEFAULT_GAS_LIMIT,
    DEFAULT_SUCCESS_DELAY, TREASURY_ADDRESS,
};
pub use provider::{connect_wallet, Receipt, TransferRequest, WalletBrand, WalletProvider};
