//! The wallet provider boundary.
//!
//! A provider is whatever holds the user's keys and talks to the chain: a
//! browser extension, a hardware wallet bridge, or a node with unlocked
//! accounts. The payment flow only ever sees this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use estate_types::{ChainId, EthAmount, TxHash, WalletAddress};

use crate::WalletError;

/// Which wallet product backs a provider. Only used for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletBrand {
    MetaMask,
    Coinbase,
    #[default]
    Generic,
}

impl fmt::Display for WalletBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WalletBrand::MetaMask => "MetaMask",
            WalletBrand::Coinbase => "Coinbase",
            WalletBrand::Generic => "Wallet",
        })
    }
}

/// A plain value transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: WalletAddress,
    pub to: WalletAddress,
    pub value: EthAmount,
    pub gas_limit: u64,
    pub gas_price: EthAmount,
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// `false` when the transaction was mined but reverted.
    pub success: bool,
}

#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn brand(&self) -> WalletBrand;

    /// Ask the user to expose their accounts. May prompt.
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, WalletError>;

    /// Accounts already exposed, without prompting. Empty when locked.
    async fn accounts(&self) -> Result<Vec<WalletAddress>, WalletError>;

    async fn chain_id(&self) -> Result<ChainId, WalletError>;

    /// Ask the wallet to move to `chain`. An error means the user declined or
    /// the wallet does not know the chain.
    async fn switch_chain(&self, chain: ChainId) -> Result<(), WalletError>;

    async fn balance(&self, account: &WalletAddress) -> Result<EthAmount, WalletError>;

    /// Current gas price quote.
    async fn gas_price(&self) -> Result<EthAmount, WalletError>;

    /// Sign and broadcast. Returns as soon as the hash is known.
    async fn send_transaction(&self, tx: &TransferRequest) -> Result<TxHash, WalletError>;

    /// Block until the transaction is mined.
    async fn wait_for_confirmation(&self, hash: &TxHash) -> Result<Receipt, WalletError>;
}

/// Log in with a wallet: request its accounts and return the first one.
///
/// Any provider failure during the request is reported as a rejected
/// connection, matching what users see when they dismiss the prompt.
pub async fn connect_wallet(
    provider: Option<&dyn WalletProvider>,
) -> Result<WalletAddress, WalletError> {
    let provider = provider.ok_or(WalletError::NoWallet)?;
    let accounts = provider.request_accounts().await.map_err(|e| {
        warn!(wallet = %provider.brand(), error = %e, "account request failed");
        WalletError::ConnectionRejected
    })?;
    let account = accounts.into_iter().next().ok_or(WalletError::NoWallet)?;
    info!(wallet = %provider.brand(), %account, "wallet connected");
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_labels() {
        assert_eq!(WalletBrand::MetaMask.to_string(), "MetaMask");
        assert_eq!(WalletBrand::Coinbase.to_string(), "Coinbase");
        assert_eq!(WalletBrand::default().to_string(), "Wallet");
    }

    #[tokio::test]
    async fn connect_without_provider_reports_missing_wallet() {
        assert_eq!(connect_wallet(None).await, Err(WalletError::NoWallet));
    }
}
