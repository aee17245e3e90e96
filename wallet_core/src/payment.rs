//! The share payment flow.
//!
//! A [`PaymentAttempt`] moves `Input → Processing → Success | Error`. From
//! `Success` it returns to `Input` once the completion callback has run; from
//! `Error` only an explicit [`PaymentAttempt::retry`] brings it back.
//!
//! ```text
//!   Input ──initiate──▶ Processing ──confirmed──▶ Success ──callback──▶ Input
//!     ▲                     │
//!     └──────retry──── Error ◀──any failure
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use estate_types::{ChainId, EthAmount, TxHash, WalletAddress};

use crate::provider::{TransferRequest, WalletProvider};
use crate::WalletError;

/// Account that receives every share payment.
pub const TREASURY_ADDRESS: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
/// Gas limit attached to every payment transfer.
pub const DEFAULT_GAS_LIMIT: u64 = 100_000;
/// How long the success state stays visible before the callback runs.
pub const DEFAULT_SUCCESS_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStep {
    Input,
    Processing,
    Success,
    Error,
}

impl fmt::Display for PaymentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStep::Input => "input",
            PaymentStep::Processing => "processing",
            PaymentStep::Success => "success",
            PaymentStep::Error => "error",
        })
    }
}

/// One open payment dialog. Lives only in memory.
#[derive(Debug, Clone)]
pub struct PaymentAttempt {
    step: PaymentStep,
    amount_eth: f64,
    tx_hash: Option<TxHash>,
    error_message: Option<String>,
    trail: Vec<PaymentStep>,
}

impl PaymentAttempt {
    pub fn new(amount_eth: f64) -> Self {
        Self {
            step: PaymentStep::Input,
            amount_eth,
            tx_hash: None,
            error_message: None,
            trail: vec![PaymentStep::Input],
        }
    }

    pub fn step(&self) -> PaymentStep {
        self.step
    }

    /// Amount to pay in ETH.
    pub fn amount_eth(&self) -> f64 {
        self.amount_eth
    }

    /// Hash of the submitted transfer, set as soon as the wallet returns it.
    pub fn tx_hash(&self) -> Option<&TxHash> {
        self.tx_hash.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Every step entered so far, starting with `Input`.
    pub fn trail(&self) -> &[PaymentStep] {
        &self.trail
    }

    /// Leave the error state so the user can try again. Nothing is resubmitted.
    pub fn retry(&mut self) -> bool {
        if self.step != PaymentStep::Error {
            return false;
        }
        self.enter(PaymentStep::Input);
        true
    }

    fn enter(&mut self, step: PaymentStep) {
        debug!(from = %self.step, to = %step, "payment step");
        self.step = step;
        self.trail.push(step);
    }

    fn fail(&mut self, error: &WalletError) {
        self.error_message = Some(error.to_string());
        self.enter(PaymentStep::Error);
    }
}

/// Chain and transfer parameters of the payment flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfig {
    pub required_chain: ChainId,
    pub treasury: WalletAddress,
    pub gas_limit: u64,
    pub success_delay: Duration,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            required_chain: ChainId::SEPOLIA,
            treasury: WalletAddress::from_trusted(TREASURY_ADDRESS),
            gas_limit: DEFAULT_GAS_LIMIT,
            success_delay: DEFAULT_SUCCESS_DELAY,
        }
    }
}

/// Result of a confirmed payment together with what the callback returned.
#[derive(Debug)]
pub struct Completed<T> {
    pub tx_hash: TxHash,
    pub outcome: T,
}

/// Runs payment attempts against an optional wallet provider.
#[derive(Clone)]
pub struct PaymentGateway {
    provider: Option<Arc<dyn WalletProvider>>,
    config: PaymentConfig,
}

impl PaymentGateway {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, config: PaymentConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> Option<&dyn WalletProvider> {
        self.provider.as_deref()
    }

    pub fn config(&self) -> &PaymentConfig {
        &self.config
    }

    /// Pay `attempt.amount_eth()` to the treasury.
    ///
    /// On confirmation the attempt enters `Success`, waits the configured
    /// delay, calls `on_success` exactly once with the transaction hash, and
    /// returns to `Input`. On any failure the attempt enters `Error` with the
    /// error text and `on_success` is dropped uncalled.
    pub async fn initiate<F, Fut, T>(
        &self,
        attempt: &mut PaymentAttempt,
        on_success: F,
    ) -> Result<Completed<T>, WalletError>
    where
        F: FnOnce(TxHash) -> Fut,
        Fut: Future<Output = T>,
    {
        match attempt.step {
            PaymentStep::Input => {}
            PaymentStep::Error => return Err(WalletError::AwaitingRetry),
            PaymentStep::Processing | PaymentStep::Success => {
                return Err(WalletError::PaymentInProgress)
            }
        }
        attempt.enter(PaymentStep::Processing);
        attempt.error_message = None;

        let tx_hash = match self.submit(attempt).await {
            Ok(hash) => hash,
            Err(e) => {
                warn!(error = %e, amount_eth = attempt.amount_eth, "payment failed");
                attempt.fail(&e);
                return Err(e);
            }
        };

        attempt.enter(PaymentStep::Success);
        if !self.config.success_delay.is_zero() {
            tokio::time::sleep(self.config.success_delay).await;
        }
        let outcome = on_success(tx_hash.clone()).await;
        attempt.enter(PaymentStep::Input);
        Ok(Completed { tx_hash, outcome })
    }

    async fn submit(&self, attempt: &mut PaymentAttempt) -> Result<TxHash, WalletError> {
        let provider = self.provider.as_deref().ok_or(WalletError::NoWallet)?;
        let from = provider
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(WalletError::NoWallet)?;

        let chain = provider.chain_id().await?;
        if chain != self.config.required_chain {
            info!(current = %chain, required = %self.config.required_chain, "requesting network switch");
            provider
                .switch_chain(self.config.required_chain)
                .await
                .map_err(|e| {
                    warn!(error = %e, "network switch declined");
                    WalletError::WrongNetwork
                })?;
        }

        if provider.balance(&from).await?.is_zero() {
            return Err(WalletError::InsufficientFunds);
        }

        let value = EthAmount::from_ether_f64(attempt.amount_eth)
            .map_err(|e| WalletError::Transaction(e.to_string()))?;
        let gas_price = provider.gas_price().await?;
        let transfer = TransferRequest {
            from,
            to: self.config.treasury.clone(),
            value,
            gas_limit: self.config.gas_limit,
            gas_price,
        };

        let hash = provider.send_transaction(&transfer).await?;
        attempt.tx_hash = Some(hash.clone());
        info!(tx_hash = %hash, value = %transfer.value, "payment submitted");

        let receipt = provider.wait_for_confirmation(&hash).await?;
        if !receipt.success {
            return Err(WalletError::Transaction("transaction reverted".into()));
        }
        info!(tx_hash = %hash, block = receipt.block_number, "payment confirmed");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_only_leaves_error() {
        let mut attempt = PaymentAttempt::new(0.5);
        assert!(!attempt.retry());
        attempt.enter(PaymentStep::Processing);
        attempt.fail(&WalletError::InsufficientFunds);
        assert_eq!(attempt.error_message(), Some("Your wallet has 0 ETH."));
        assert!(attempt.retry());
        assert_eq!(attempt.step(), PaymentStep::Input);
        assert_eq!(
            attempt.trail(),
            &[
                PaymentStep::Input,
                PaymentStep::Processing,
                PaymentStep::Error,
                PaymentStep::Input
            ]
        );
    }

    #[test]
    fn defaults_target_sepolia_treasury() {
        let config = PaymentConfig::default();
        assert_eq!(config.required_chain.to_hex(), "0xaa36a7");
        assert_eq!(config.treasury.as_str(), TREASURY_ADDRESS);
        assert_eq!(config.gas_limit, 100_000);
        assert_eq!(config.success_delay, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn missing_provider_fails_without_callback() {
        let gateway = PaymentGateway::new(None, PaymentConfig::default());
        let mut attempt = PaymentAttempt::new(0.5);
        let mut called = false;
        let result = gateway
            .initiate(&mut attempt, |_| {
                called = true;
                async {}
            })
            .await;
        assert_eq!(result.unwrap_err(), WalletError::NoWallet);
        assert!(!called);
        assert_eq!(attempt.step(), PaymentStep::Error);
        assert_eq!(attempt.error_message(), Some("No Crypto Wallet Found"));
    }
}
