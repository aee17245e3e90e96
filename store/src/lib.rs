//! Storage boundaries for TokenEstate.
//!
//! Two kinds of state live outside the controller:
//! - the remote listing/portfolio database, reached through [`RemoteDataClient`];
//! - a handful of locally persisted preferences, kept in a [`KeyValueStore`].
//!
//! The rest of the codebase depends only on the traits. [`RestDataClient`] and
//! [`FileKeyValueStore`] are the production implementations; deterministic
//! in-memory versions live in `estate-nullables`.

pub mod client;
pub mod error;
pub mod kv;
pub mod rest;

pub use client::{
    BuySharesRequest, RemoteDataClient, BUY_SHARES_FN, PORTFOLIO_TABLE, PROPERTIES_TABLE,
};
pub use error::StoreError;
pub use kv::{FileKeyValueStore, KeyValueStore, KEY_THEME, KEY_WALLET};
pub use rest::RestDataClient;
