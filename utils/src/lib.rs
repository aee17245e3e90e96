//! Shared utilities for TokenEstate.

pub mod format;
pub mod logging;

pub use format::{eth_to_usd, format_eth, format_usd, short_address, ETH_TO_USD};
pub use logging::{init_logging, LogFormat};
