//! Fundamental types for the TokenEstate marketplace.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! wallet addresses, ETH amounts, chain identifiers, transaction hashes, listings,
//! portfolio entries, and the display theme.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod listing;
pub mod network;
pub mod portfolio;
pub mod theme;

pub use address::WalletAddress;
pub use amount::EthAmount;
pub use error::EstateError;
pub use hash::TxHash;
pub use listing::{Listing, ListingId, ListingUpdate, NewListing, ValuePoint};
pub use network::ChainId;
pub use portfolio::PortfolioEntry;
pub use theme::Theme;
