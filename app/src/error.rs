use thiserror::Error;

use estate_store::StoreError;
use estate_types::EstateError;
use estate_wallet_core::WalletError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The data API refused or failed a write. Displays the API's message.
    #[error("{0}")]
    DataWrite(#[from] StoreError),

    #[error("{0}")]
    Wallet(#[from] WalletError),

    #[error("{0}")]
    Validation(String),

    #[error("no wallet connected")]
    NotConnected,

    #[error("no listing selected")]
    NoSelection,

    #[error("config error: {0}")]
    Config(String),
}

impl From<EstateError> for AppError {
    fn from(e: EstateError) -> Self {
        AppError::Validation(e.to_string())
    }
}
