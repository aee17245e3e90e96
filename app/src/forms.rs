//! Seller input forms.

use serde::{Deserialize, Serialize};

use estate_types::{
    EstateError, Listing, ListingId, ListingUpdate, NewListing, ValuePoint, WalletAddress,
};

/// The "tokenize a property" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintForm {
    pub title: String,
    pub location: String,
    pub price_per_share: f64,
    pub total_shares: u64,
    pub yield_pct: f64,
    pub image_url: String,
}

impl Default for MintForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            price_per_share: 0.01,
            total_shares: 1000,
            yield_pct: 6.5,
            image_url: String::new(),
        }
    }
}

impl MintForm {
    /// Insert payload offering every share, listed by `seller`.
    pub fn to_new_listing(
        &self,
        seller: &WalletAddress,
        history: Vec<ValuePoint>,
    ) -> Result<NewListing, EstateError> {
        let listing = NewListing {
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            price_per_share: self.price_per_share,
            total_shares: self.total_shares,
            yield_pct: self.yield_pct,
            image_url: self.image_url.trim().to_string(),
            available_shares: self.total_shares,
            history,
            seller_id: seller.clone(),
        };
        listing.validate()?;
        Ok(listing)
    }
}

/// A seller's in-progress edit of one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEdit {
    pub id: ListingId,
    pub price_per_share: f64,
    pub total_shares: u64,
}

impl ListingEdit {
    /// Start from the listing's current values.
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            price_per_share: listing.price_per_share,
            total_shares: listing.total_shares,
        }
    }

    pub fn to_update(&self) -> ListingUpdate {
        ListingUpdate {
            price_per_share: self.price_per_share,
            total_shares: self.total_shares,
        }
    }
}
