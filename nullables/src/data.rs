//! Nullable data API: listings and portfolios held in memory.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use estate_store::{BuySharesRequest, RemoteDataClient, StoreError};
use estate_types::{Listing, ListingId, ListingUpdate, NewListing, PortfolioEntry, WalletAddress};

/// An in-memory [`RemoteDataClient`] with the same write rules as the
/// hosted database: purchases are atomic and never oversell.
pub struct NullDataClient {
    /// Newest first, as `fetch_listings` returns them.
    listings: Mutex<Vec<Listing>>,
    portfolio: Mutex<Vec<PortfolioEntry>>,
    next_id: AtomicUsize,
    fail_next_write: Mutex<Option<String>>,
    fail_reads: Mutex<Option<String>>,
    listing_fetches: AtomicUsize,
    portfolio_fetches: AtomicUsize,
    purchases: Mutex<Vec<BuySharesRequest>>,
}

impl NullDataClient {
    pub fn new() -> Self {
        Self {
            listings: Mutex::new(Vec::new()),
            portfolio: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            fail_next_write: Mutex::new(None),
            fail_reads: Mutex::new(None),
            listing_fetches: AtomicUsize::new(0),
            portfolio_fetches: AtomicUsize::new(0),
            purchases: Mutex::new(Vec::new()),
        }
    }

    /// Seed with listings given newest first.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        let client = Self::new();
        *client.listings.lock().unwrap() = listings;
        client
    }

    /// Reject the next insert, update, or purchase with `message`.
    pub fn fail_next_write(&self, message: impl Into<String>) {
        *self.fail_next_write.lock().unwrap() = Some(message.into());
    }

    /// Make every read fail with `message` until cleared with `None`.
    pub fn fail_reads(&self, message: Option<&str>) {
        *self.fail_reads.lock().unwrap() = message.map(str::to_owned);
    }

    pub fn listing(&self, id: &ListingId) -> Option<Listing> {
        self.listings
            .lock()
            .unwrap()
            .iter()
            .find(|l| &l.id == id)
            .cloned()
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.listings.lock().unwrap().clone()
    }

    pub fn portfolio_rows(&self) -> Vec<PortfolioEntry> {
        self.portfolio.lock().unwrap().clone()
    }

    pub fn purchases(&self) -> Vec<BuySharesRequest> {
        self.purchases.lock().unwrap().clone()
    }

    pub fn listing_fetches(&self) -> usize {
        self.listing_fetches.load(Ordering::SeqCst)
    }

    pub fn portfolio_fetches(&self) -> usize {
        self.portfolio_fetches.load(Ordering::SeqCst)
    }

    fn next_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        match self.fail_reads.lock().unwrap().as_ref() {
            Some(message) => Err(StoreError::Request(message.clone())),
            None => Ok(()),
        }
    }

    fn check_write(&self) -> Result<(), StoreError> {
        match self.fail_next_write.lock().unwrap().take() {
            Some(message) => Err(StoreError::Rejected(message)),
            None => Ok(()),
        }
    }
}

impl Default for NullDataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteDataClient for NullDataClient {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, StoreError> {
        self.listing_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        Ok(self.listings())
    }

    async fn fetch_portfolio(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<PortfolioEntry>, StoreError> {
        self.portfolio_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_reads()?;
        Ok(self
            .portfolio
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id.as_ref().is_some_and(|u| u == owner))
            .cloned()
            .collect())
    }

    async fn insert_listing(&self, listing: &NewListing) -> Result<(), StoreError> {
        self.check_write()?;
        listing
            .validate()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        let row = Listing {
            id: ListingId::new(self.next_id()),
            title: listing.title.clone(),
            location: listing.location.clone(),
            price_per_share: listing.price_per_share,
            yield_pct: listing.yield_pct,
            available_shares: listing.available_shares,
            total_shares: listing.total_shares,
            image_url: Some(listing.image_url.clone()),
            description: None,
            seller_id: Some(listing.seller_id.clone()),
            history: listing.history.clone(),
            created_at: None,
        };
        self.listings.lock().unwrap().insert(0, row);
        Ok(())
    }

    async fn update_listing(
        &self,
        id: &ListingId,
        update: &ListingUpdate,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let mut listings = self.listings.lock().unwrap();
        let Some(listing) = listings.iter_mut().find(|l| &l.id == id) else {
            return Ok(());
        };
        update
            .check_against(listing)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        listing.price_per_share = update.price_per_share;
        listing.total_shares = update.total_shares;
        Ok(())
    }

    async fn buy_shares(&self, request: &BuySharesRequest) -> Result<(), StoreError> {
        self.check_write()?;
        let mut listings = self.listings.lock().unwrap();
        let listing = listings
            .iter_mut()
            .find(|l| l.id == request.asset_id)
            .ok_or_else(|| StoreError::Rejected("Property not found".into()))?;
        if request.quantity == 0 || request.quantity > listing.available_shares {
            return Err(StoreError::Rejected("Not enough shares available".into()));
        }
        listing.available_shares -= request.quantity;

        let entry = PortfolioEntry {
            id: self.next_id(),
            asset_id: listing.id.clone(),
            title: listing.title.clone(),
            shares: request.quantity,
            value: request.total_price,
            tx_hash: None,
            user_id: Some(request.user_id.clone()),
        };
        self.portfolio.lock().unwrap().push(entry);
        self.purchases.lock().unwrap().push(request.clone());
        Ok(())
    }
}
