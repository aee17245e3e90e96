use thiserror::Error;

/// Failures of the wallet connection and the payment flow.
///
/// The `Display` text of each variant is what the user sees next to the retry button.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("No Crypto Wallet Found")]
    NoWallet,

    #[error("Wrong Network")]
    WrongNetwork,

    #[error("Your wallet has 0 ETH.")]
    InsufficientFunds,

    /// Submission or confirmation failed after the wallet accepted the request.
    #[error("{0}")]
    Transaction(String),

    #[error("Connection rejected.")]
    ConnectionRejected,

    #[error("a payment is already in progress")]
    PaymentInProgress,

    /// The previous attempt failed and has not been reset with `retry`.
    #[error("The last payment failed. Retry before paying again.")]
    AwaitingRetry,

    /// Error reported by the wallet provider itself, message kept verbatim.
    #[error("{0}")]
    Provider(String),
}
