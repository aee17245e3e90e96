//! ETH amount type.
//!
//! Amounts are represented as fixed-point integers (u128 wei) to avoid floating-point errors
//! once a value leaves the display layer. The smallest unit is 1 wei; 1 ETH = 10^18 wei.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::EstateError;

/// Number of decimal places between ETH and wei.
pub const ETH_DECIMALS: u32 = 18;

const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// An amount of ETH, stored as wei.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EthAmount(u128);

impl EthAmount {
    pub const ZERO: Self = Self(0);

    pub fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    pub fn wei(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal ETH string such as `"0.5"` or `"12"`.
    ///
    /// At most 18 fractional digits are accepted.
    pub fn parse_ether(s: &str) -> Result<Self, EstateError> {
        let s = s.trim();
        let invalid = || EstateError::InvalidAmount(s.to_string());
        if s.is_empty() {
            return Err(invalid());
        }

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > ETH_DECIMALS as usize {
            return Err(EstateError::InvalidAmount(format!(
                "{s}: more than {ETH_DECIMALS} decimal places"
            )));
        }

        let whole_wei = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .ok()
                .and_then(|w| w.checked_mul(WEI_PER_ETH))
                .ok_or_else(invalid)?
        };

        let frac_wei = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = ETH_DECIMALS as usize);
            padded.parse::<u128>().map_err(|_| invalid())?
        };

        whole_wei
            .checked_add(frac_wei)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Convert a display-layer ETH value to wei.
    ///
    /// The value is rendered as its shortest decimal representation first, so
    /// `0.05 * 10.0` becomes exactly 0.5 ETH rather than the nearest binary fraction.
    /// When that needs more than 18 decimals it is rounded to the nearest wei.
    pub fn from_ether_f64(eth: f64) -> Result<Self, EstateError> {
        if !eth.is_finite() || eth < 0.0 {
            return Err(EstateError::InvalidAmount(eth.to_string()));
        }
        let shortest = eth.to_string();
        let decimals = shortest.split_once('.').map_or(0, |(_, frac)| frac.len());
        if decimals <= ETH_DECIMALS as usize {
            Self::parse_ether(&shortest)
        } else {
            Self::parse_ether(&format!("{eth:.18}"))
        }
    }

    /// Exact decimal ETH string with trailing zeros trimmed.
    pub fn format_ether(&self) -> String {
        let whole = self.0 / WEI_PER_ETH;
        let frac = self.0 % WEI_PER_ETH;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:018}");
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }

    /// JSON-RPC quantity encoding (`0x`-prefixed, no leading zeros).
    pub fn to_hex_quantity(&self) -> String {
        format!("{:#x}", self.0)
    }

    /// Decode a JSON-RPC quantity such as `"0x1bc16d674ec80000"`.
    pub fn from_hex_quantity(s: &str) -> Result<Self, EstateError> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| EstateError::InvalidAmount(s.to_string()))?;
        if digits.is_empty() {
            return Ok(Self::ZERO);
        }
        u128::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| EstateError::InvalidAmount(s.to_string()))
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for EthAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for EthAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for EthAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", self.format_ether())
    }
}
