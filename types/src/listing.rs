//! Tokenized property listings.
//!
//! Field names on the wire follow the remote `properties` table, which is why
//! the yield column is serialized as `yield`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::{EstateError, WalletAddress};

/// Identifier of a listing row. The remote table may hand out integer or UUID keys;
/// both are normalised to their string form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// One point of a listing's historical value series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub month: String,
    pub value: f64,
}

/// A tokenized property offered in fractional shares.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub location: String,
    /// Price of one share in ETH.
    pub price_per_share: f64,
    /// Annual yield in percent.
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    pub available_shares: u64,
    pub total_shares: u64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seller_id: Option<WalletAddress>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub history: Vec<ValuePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Listing {
    /// Check the share invariant and basic field sanity.
    pub fn validate(&self) -> Result<(), EstateError> {
        check_fields(&self.title, self.price_per_share, self.total_shares)?;
        if self.available_shares > self.total_shares {
            return Err(EstateError::InvalidListing {
                reason: format!(
                    "available shares {} exceed total shares {}",
                    self.available_shares, self.total_shares
                ),
            });
        }
        Ok(())
    }

    /// Shares already sold to investors.
    pub fn sold_shares(&self) -> u64 {
        self.total_shares.saturating_sub(self.available_shares)
    }

    /// Remaining share percentage, rounded to the nearest whole percent.
    pub fn availability_pct(&self) -> u32 {
        if self.total_shares == 0 {
            return 0;
        }
        (self.available_shares as f64 / self.total_shares as f64 * 100.0).round() as u32
    }

    /// Cost in ETH of buying `quantity` shares at the current price.
    pub fn cost_of(&self, quantity: u64) -> f64 {
        quantity as f64 * self.price_per_share
    }

    /// Text before the first comma of the location ("Malibu, CA, USA" → "Malibu").
    pub fn primary_location(&self) -> &str {
        self.location.split(',').next().unwrap_or_default().trim()
    }

    /// Image reference, or `None` when the card should show the placeholder.
    pub fn image_or_placeholder(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Whether `account` minted this listing.
    pub fn is_listed_by(&self, account: &WalletAddress) -> bool {
        self.seller_id
            .as_ref()
            .is_some_and(|seller| seller.is_same_account(account))
    }

    /// Key used to pick a stable colour palette for this listing.
    pub fn palette_key(&self) -> String {
        format!("{}{}", self.title, self.id)
    }
}

/// Insert payload for a freshly minted listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub location: String,
    pub price_per_share: f64,
    pub total_shares: u64,
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    pub image_url: String,
    pub available_shares: u64,
    pub history: Vec<ValuePoint>,
    pub seller_id: WalletAddress,
}

impl NewListing {
    pub fn validate(&self) -> Result<(), EstateError> {
        check_fields(&self.title, self.price_per_share, self.total_shares)?;
        if self.available_shares != self.total_shares {
            return Err(EstateError::InvalidListing {
                reason: "a new listing must offer all of its shares".into(),
            });
        }
        Ok(())
    }
}

/// Seller edit of price and share count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingUpdate {
    pub price_per_share: f64,
    pub total_shares: u64,
}

impl ListingUpdate {
    /// Check that applying this update to `listing` keeps `available ≤ total`.
    pub fn check_against(&self, listing: &Listing) -> Result<(), EstateError> {
        check_fields(&listing.title, self.price_per_share, self.total_shares)?;
        if self.total_shares < listing.available_shares {
            return Err(EstateError::InvalidListing {
                reason: format!(
                    "total shares {} below the {} shares still available",
                    self.total_shares, listing.available_shares
                ),
            });
        }
        Ok(())
    }
}

fn check_fields(title: &str, price_per_share: f64, total_shares: u64) -> Result<(), EstateError> {
    if title.trim().is_empty() {
        return Err(EstateError::InvalidListing {
            reason: "title is required".into(),
        });
    }
    if !price_per_share.is_finite() || price_per_share <= 0.0 {
        return Err(EstateError::InvalidListing {
            reason: format!("price per share must be positive, got {price_per_share}"),
        });
    }
    if total_shares == 0 {
        return Err(EstateError::InvalidListing {
            reason: "total shares must be at least 1".into(),
        });
    }
    Ok(())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn villa() -> Listing {
        Listing {
            id: ListingId::new("7"),
            title: "Oceanfront Villa".into(),
            location: "Malibu, CA, USA".into(),
            price_per_share: 0.05,
            yield_pct: 6.5,
            available_shares: 1000,
            total_shares: 1000,
            image_url: Some("  ".into()),
            description: None,
            seller_id: None,
            history: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn decodes_remote_row() {
        let row = serde_json::json!({
            "id": 42,
            "title": "Harbor Office Tower",
            "location": "Boston, MA",
            "price_per_share": 0.2,
            "yield": 7.25,
            "available_shares": 10,
            "total_shares": 50,
            "image_url": null,
            "history": null,
            "created_at": "2025-01-04T10:00:00Z"
        });
        let listing: Listing = serde_json::from_value(row).unwrap();
        assert_eq!(listing.id.as_str(), "42");
        assert_eq!(listing.yield_pct, 7.25);
        assert!(listing.history.is_empty());
        assert_eq!(listing.image_or_placeholder(), None);
        assert_eq!(listing.availability_pct(), 20);
        assert_eq!(listing.sold_shares(), 40);
    }

    #[test]
    fn cost_and_location() {
        let listing = villa();
        assert!((listing.cost_of(10) - 0.5).abs() < 1e-12);
        assert_eq!(listing.primary_location(), "Malibu");
        assert_eq!(listing.palette_key(), "Oceanfront Villa7");
    }

    #[test]
    fn validate_rejects_oversold_listing() {
        let mut listing = villa();
        assert!(listing.validate().is_ok());
        listing.available_shares = 1001;
        assert!(listing.validate().is_err());
    }

    #[test]
    fn update_cannot_drop_total_below_available() {
        let mut listing = villa();
        listing.available_shares = 600;
        let shrink = ListingUpdate {
            price_per_share: 0.06,
            total_shares: 500,
        };
        assert!(shrink.check_against(&listing).is_err());
        let ok = ListingUpdate {
            price_per_share: 0.06,
            total_shares: 600,
        };
        assert!(ok.check_against(&listing).is_ok());
    }
}
