use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote service refused the write; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("remote returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Serialization(e.to_string())
        } else {
            StoreError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}
