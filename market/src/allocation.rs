//! Portfolio valuation at current listing prices.

use estate_types::{Listing, ListingId, PortfolioEntry, Theme, TxHash};

use crate::palette::{palette_for, UNKNOWN_ACCENT};

/// One wedge of the allocation chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSlice {
    pub name: String,
    /// Current value in ETH.
    pub value_eth: f64,
    /// Share of the portfolio's total value, rounded to a whole percent.
    pub percent: u32,
    pub color: &'static str,
    pub tx_hash: Option<TxHash>,
}

/// A portfolio row valued at its listing's current price.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub asset_id: ListingId,
    pub title: String,
    pub shares: u64,
    /// ETH paid when the shares were bought.
    pub cost_eth: f64,
    /// Current value in ETH; zero when the listing is gone.
    pub value_eth: f64,
    pub tx_hash: Option<TxHash>,
}

fn find<'a>(listings: &'a [Listing], id: &ListingId) -> Option<&'a Listing> {
    listings.iter().find(|l| &l.id == id)
}

fn current_value(entry: &PortfolioEntry, listings: &[Listing]) -> f64 {
    find(listings, &entry.asset_id)
        .map(|l| entry.value_at(l.price_per_share))
        .unwrap_or(0.0)
}

/// Every portfolio row with its current value, in portfolio order.
pub fn holdings(portfolio: &[PortfolioEntry], listings: &[Listing]) -> Vec<Holding> {
    portfolio
        .iter()
        .map(|entry| Holding {
            asset_id: entry.asset_id.clone(),
            title: entry.title.clone(),
            shares: entry.shares,
            cost_eth: entry.value,
            value_eth: current_value(entry, listings),
            tx_hash: entry.tx_hash.clone(),
        })
        .collect()
}

/// Total shares of `listing` held across all portfolio rows.
pub fn owned_shares(portfolio: &[PortfolioEntry], listing: &ListingId) -> u64 {
    portfolio
        .iter()
        .filter(|e| &e.asset_id == listing)
        .map(|e| e.shares)
        .sum()
}

/// Sum of current holding values in ETH.
pub fn net_worth_eth(portfolio: &[PortfolioEntry], listings: &[Listing]) -> f64 {
    portfolio.iter().map(|e| current_value(e, listings)).sum()
}

/// Allocation chart data. Worthless holdings are left out.
pub fn allocation(
    portfolio: &[PortfolioEntry],
    listings: &[Listing],
    theme: Theme,
) -> Vec<AllocationSlice> {
    let mut slices: Vec<AllocationSlice> = portfolio
        .iter()
        .map(|entry| {
            let listing = find(listings, &entry.asset_id);
            AllocationSlice {
                name: entry.title.clone(),
                value_eth: current_value(entry, listings),
                percent: 0,
                color: listing
                    .map(|l| palette_for(&l.palette_key(), theme).accent)
                    .unwrap_or(UNKNOWN_ACCENT),
                tx_hash: entry.tx_hash.clone(),
            }
        })
        .filter(|slice| slice.value_eth > 0.0)
        .collect();

    let total: f64 = slices.iter().map(|s| s.value_eth).sum();
    if total > 0.0 {
        for slice in &mut slices {
            slice.percent = (slice.value_eth / total * 100.0).round() as u32;
        }
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, title: &str, price: f64) -> Listing {
        Listing {
            id: ListingId::new(id),
            title: title.into(),
            location: "Somewhere".into(),
            price_per_share: price,
            yield_pct: 5.0,
            available_shares: 10,
            total_shares: 100,
            image_url: None,
            description: None,
            seller_id: None,
            history: Vec::new(),
            created_at: None,
        }
    }

    fn entry(id: &str, asset: &str, title: &str, shares: u64) -> PortfolioEntry {
        PortfolioEntry {
            id: id.into(),
            asset_id: ListingId::new(asset),
            title: title.into(),
            shares,
            value: 0.1,
            tx_hash: None,
            user_id: None,
        }
    }

    #[test]
    fn values_at_current_price() {
        let listings = vec![listing("1", "Villa", 0.05), listing("2", "Tower", 0.15)];
        let portfolio = vec![
            entry("a", "1", "Villa", 10),
            entry("b", "2", "Tower", 10),
            entry("c", "1", "Villa", 5),
        ];
        assert!((net_worth_eth(&portfolio, &listings) - 2.25).abs() < 1e-9);
        assert_eq!(owned_shares(&portfolio, &ListingId::new("1")), 15);

        let held = holdings(&portfolio, &listings);
        assert_eq!(held.len(), 3);
        assert!((held[1].value_eth - 1.5).abs() < 1e-9);
    }

    #[test]
    fn allocation_drops_unknown_and_worthless() {
        let listings = vec![listing("1", "Villa", 0.05), listing("2", "Tower", 0.15)];
        let portfolio = vec![
            entry("a", "1", "Villa", 10),
            entry("b", "2", "Tower", 10),
            entry("c", "9", "Delisted", 10),
        ];
        let slices = allocation(&portfolio, &listings, Theme::Light);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].percent, 25);
        assert_eq!(slices[1].percent, 75);
        assert_eq!(
            slices[0].color,
            palette_for(&listings[0].palette_key(), Theme::Light).accent
        );
        assert!(allocation(&[], &listings, Theme::Dark).is_empty());
    }
}
