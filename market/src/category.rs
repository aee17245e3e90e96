//! Property categories derived from listing titles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Residence,
    Commercial,
    Land,
    Other,
}

/// Keyword table, checked in order. The first category with a matching keyword wins.
const KEYWORDS: [(Category, &[&str]); 3] = [
    (
        Category::Residence,
        &["house", "villa", "apt", "condo", "home", "residence"],
    ),
    (
        Category::Commercial,
        &[
            "building",
            "office",
            "mall",
            "shop",
            "store",
            "tower",
            "commercial",
            "school",
            "college",
        ],
    ),
    (Category::Land, &["land", "plot", "acre", "field", "site"]),
];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Residence,
        Category::Commercial,
        Category::Land,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Residence => "Residence",
            Category::Commercial => "Commercial",
            Category::Land => "Land",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Categorise a listing by substring matches in its lowercased title.
pub fn classify(title: &str) -> Category {
    let title = title.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| title.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}
