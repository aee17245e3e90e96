//! Marketplace computations over listings and portfolios.
//!
//! Everything here is pure apart from [`OsRandom`]: classification and
//! filtering of listings, the per-listing colour palette, trend chart
//! geometry, portfolio valuation, and mock value histories for new listings.

pub mod allocation;
pub mod category;
pub mod chart;
pub mod history;
pub mod palette;
pub mod query;

pub use allocation::{allocation, holdings, net_worth_eth, owned_shares, AllocationSlice, Holding};
pub use category::{classify, Category};
pub use chart::TrendChart;
pub use history::{mock_history, OsRandom, RandomSource, HISTORY_MONTHS};
pub use palette::{palette_for, palette_index, Palette};
pub use query::{CategoryFilter, ListingQuery, SortOrder};
