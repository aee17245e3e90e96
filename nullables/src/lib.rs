//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the marketplace (wallet, data API,
//! preference storage, randomness) is abstracted behind a trait. This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be scripted and inspected programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod data;
pub mod kv;
pub mod random;
pub mod wallet;

pub use data::NullDataClient;
pub use kv::NullKeyValueStore;
pub use random::NullRandom;
pub use wallet::NullWallet;
