//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::EstateError;

/// Identifies which EVM network a wallet transaction must target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const MAINNET: Self = Self(1);
    /// The Sepolia public test network, where purchases settle.
    pub const SEPOLIA: Self = Self(11_155_111);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Hex form used by `eth_chainId` and `wallet_switchEthereumChain`.
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, EstateError> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| EstateError::InvalidChainId(s.to_string()))?;
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| EstateError::InvalidChainId(s.to_string()))
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self.0 {
            1 => "mainnet",
            11_155_111 => "sepolia",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sepolia_hex_form() {
        assert_eq!(ChainId::SEPOLIA.to_hex(), "0xaa36a7");
        assert_eq!(ChainId::from_hex("0xaa36a7").unwrap(), ChainId::SEPOLIA);
        assert!(ChainId::from_hex("aa36a7").is_err());
    }
}
