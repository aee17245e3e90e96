//! Wallet address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::EstateError;

/// An EVM account address: `0x` followed by 40 hex digits.
///
/// The original casing is preserved (checksummed addresses stay checksummed);
/// use [`WalletAddress::is_same_account`] when comparing addresses that may
/// come from different sources.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The standard prefix for all addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex digits after the prefix.
    pub const HEX_LEN: usize = 40;

    /// Parse and validate an address string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, EstateError> {
        let s = raw.into();
        let s = s.trim().to_string();
        let digits = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| EstateError::InvalidAddress(s.clone()))?;
        if digits.len() != Self::HEX_LEN || hex::decode(digits).is_err() {
            return Err(EstateError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Wrap an address that is already known to be well formed, such as a
    /// compiled-in constant.
    pub fn from_trusted(raw: &str) -> Self {
        debug_assert!(Self::parse(raw).is_ok(), "malformed address constant: {raw}");
        Self(raw.to_string())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare two addresses ignoring hex digit casing.
    pub fn is_same_account(&self, other: &WalletAddress) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Lowercased form, as most JSON-RPC endpoints return it.
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = EstateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = EstateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
