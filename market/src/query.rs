//! Search, category filter, and sort over the listing collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use estate_types::Listing;

use crate::category::{classify, Category};

/// Label of the "no category filter" choice.
pub const ALL_TYPES: &str = "All Types";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep the order the listings were fetched in.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    YieldAsc,
}

impl SortOrder {
    pub fn token(&self) -> &'static str {
        match self {
            SortOrder::Default => "default",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::YieldAsc => "yield-asc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "" => Ok(SortOrder::Default),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "yield-asc" => Ok(SortOrder::YieldAsc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn accepts(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_TYPES),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL_TYPES) || s.eq_ignore_ascii_case("all") || s.is_empty() {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// The market page's search box, type filter, and sort selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl ListingQuery {
    /// Case-insensitive search over title and location, and the category filter.
    pub fn matches(&self, listing: &Listing) -> bool {
        let needle = self.search.to_lowercase();
        let found = needle.is_empty()
            || listing.title.to_lowercase().contains(&needle)
            || listing.location.to_lowercase().contains(&needle);
        found && self.category.accepts(classify(&listing.title))
    }

    /// Listings that pass the filter, in the selected order.
    ///
    /// The sort is stable, so ties keep their fetched order.
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        let mut visible: Vec<&Listing> = listings.iter().filter(|l| self.matches(l)).collect();
        match self.sort {
            SortOrder::Default => {}
            SortOrder::PriceAsc => {
                visible.sort_by(|a, b| a.price_per_share.total_cmp(&b.price_per_share))
            }
            SortOrder::PriceDesc => {
                visible.sort_by(|a, b| b.price_per_share.total_cmp(&a.price_per_share))
            }
            SortOrder::YieldAsc => visible.sort_by(|a, b| a.yield_pct.total_cmp(&b.yield_pct)),
        }
        visible
    }
}
