//! Transaction hash type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::EstateError;

/// A 32-byte transaction hash in its `0x`-prefixed hex form.
///
/// Kept as the string the wallet returned so it can be shown and linked verbatim.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Number of hex digits after the prefix.
    pub const HEX_LEN: usize = 64;

    pub fn parse(raw: impl Into<String>) -> Result<Self, EstateError> {
        let s = raw.into();
        match s.strip_prefix("0x") {
            Some(digits) if digits.len() == Self::HEX_LEN && hex::decode(digits).is_ok() => {
                Ok(Self(s))
            }
            _ => Err(EstateError::InvalidTxHash(s)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading ten characters followed by an ellipsis, as shown in purchase receipts.
    pub fn short(&self) -> String {
        let head: String = self.0.chars().take(10).collect();
        format!("{head}...")
    }

    /// Link to this transaction on a block explorer (`base` without trailing slash).
    pub fn explorer_url(&self, base: &str) -> String {
        format!("{}/tx/{}", base.trim_end_matches('/'), self.0)
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.short())
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_shorten() {
        let raw = format!("0x{}", "ab".repeat(32));
        let hash = TxHash::parse(raw.clone()).unwrap();
        assert_eq!(hash.as_str(), raw);
        assert_eq!(hash.short(), "0xabababab...");
        assert_eq!(
            hash.explorer_url("https://sepolia.etherscan.io/"),
            format!("https://sepolia.etherscan.io/tx/{raw}")
        );
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(TxHash::parse("0xabcd").is_err());
        assert!(TxHash::parse("ab".repeat(32)).is_err());
    }
}
