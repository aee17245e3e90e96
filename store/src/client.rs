//! Remote data client trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use estate_types::{Listing, ListingId, ListingUpdate, NewListing, PortfolioEntry, WalletAddress};

use crate::StoreError;

/// Table holding every listing.
pub const PROPERTIES_TABLE: &str = "properties";
/// Table holding per-wallet ownership rows.
pub const PORTFOLIO_TABLE: &str = "portfolio";
/// Remote procedure that records a purchase.
pub const BUY_SHARES_FN: &str = "buy_shares";

/// Arguments of the `buy_shares` remote procedure.
///
/// The procedure is expected to decrement the listing's available shares and
/// insert the buyer's portfolio row in one server-side transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuySharesRequest {
    #[serde(rename = "p_asset_id")]
    pub asset_id: ListingId,
    #[serde(rename = "p_user_id")]
    pub user_id: WalletAddress,
    #[serde(rename = "p_quantity")]
    pub quantity: u64,
    #[serde(rename = "p_total_price")]
    pub total_price: f64,
}

/// The durable source of truth for listings and portfolio entries.
///
/// Every call is attempted once; callers decide how to surface failures.
#[async_trait]
pub trait RemoteDataClient: Send + Sync {
    /// All listings, newest first.
    async fn fetch_listings(&self) -> Result<Vec<Listing>, StoreError>;

    /// Portfolio rows owned by `owner`.
    async fn fetch_portfolio(&self, owner: &WalletAddress)
        -> Result<Vec<PortfolioEntry>, StoreError>;

    async fn insert_listing(&self, listing: &NewListing) -> Result<(), StoreError>;

    /// Overwrite price and share count of the listing with `id`.
    async fn update_listing(&self, id: &ListingId, update: &ListingUpdate)
        -> Result<(), StoreError>;

    async fn buy_shares(&self, request: &BuySharesRequest) -> Result<(), StoreError>;
}
