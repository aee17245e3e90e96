//! Everything the controller knows at a given moment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use estate_market::ListingQuery;
use estate_types::{Listing, ListingId, PortfolioEntry, Theme, WalletAddress};
use estate_wallet_core::PaymentAttempt;

use crate::forms::{ListingEdit, MintForm};
use crate::geo::MapSession;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Portfolio dashboard.
    #[default]
    Landing,
    Market,
    /// Detail page of the selected listing.
    Asset,
    Seller,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            View::Landing => "landing",
            View::Market => "market",
            View::Asset => "asset",
            View::Seller => "seller",
        })
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "landing" => Ok(View::Landing),
            "market" => Ok(View::Market),
            "asset" => Ok(View::Asset),
            "seller" => Ok(View::Seller),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

/// Application state owned by the [`ViewController`](crate::ViewController).
#[derive(Debug, Default)]
pub struct AppState {
    pub account: Option<WalletAddress>,
    pub view: View,
    pub theme: Theme,
    /// Newest first, as fetched.
    pub listings: Vec<Listing>,
    pub portfolio: Vec<PortfolioEntry>,
    pub selected: Option<ListingId>,
    pub buy_quantity: u64,
    pub query: ListingQuery,
    pub mint_form: MintForm,
    pub editing: Option<ListingEdit>,
    pub loading: bool,
    pub payment: Option<PaymentAttempt>,
    pub map: Option<MapSession>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            buy_quantity: 1,
            ..Self::default()
        }
    }

    pub fn listing(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| &l.id == id)
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.selected.as_ref().and_then(|id| self.listing(id))
    }
}
