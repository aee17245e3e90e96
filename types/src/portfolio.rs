//! A wallet's recorded ownership stake in a listing.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ListingId, TxHash, WalletAddress};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub asset_id: ListingId,
    #[serde(default)]
    pub title: String,
    pub shares: u64,
    /// Value recorded at purchase time, in ETH.
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub tx_hash: Option<TxHash>,
    #[serde(default)]
    pub user_id: Option<WalletAddress>,
}

impl PortfolioEntry {
    /// Value of this stake at the given share price.
    pub fn value_at(&self, price_per_share: f64) -> f64 {
        self.shares as f64 * price_per_share
    }
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(ListingId::deserialize(deserializer)?.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_row_with_numeric_ids() {
        let row = serde_json::json!({
            "id": 3,
            "asset_id": 7,
            "title": "Oceanfront Villa",
            "shares": 10,
            "value": 0.5,
            "user_id": "0x71C7656EC7ab88b098defB751B7401B5f6d8976F"
        });
        let entry: PortfolioEntry = serde_json::from_value(row).unwrap();
        assert_eq!(entry.id, "3");
        assert_eq!(entry.asset_id, ListingId::new("7"));
        assert!(entry.tx_hash.is_none());
        assert!((entry.value_at(0.06) - 0.6).abs() < 1e-12);
    }
}
