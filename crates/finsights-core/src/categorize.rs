//! Keyword-based transaction categorization
//!
//! Maps a transaction's free-text description and merchant name to one of a
//! fixed set of spending categories. Matching walks an explicit
//! priority-ordered rule table so results never depend on a collection's
//! iteration order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed set of spending categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    FoodDining,
    Transportation,
    Shopping,
    Entertainment,
    Healthcare,
    Utilities,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }

    /// Fixed display color for charts
    pub fn color(&self) -> &'static str {
        match self {
            Category::FoodDining => "#ef4444",
            Category::Transportation => "#3b82f6",
            Category::Shopping => "#8b5cf6",
            Category::Entertainment => "#f59e0b",
            Category::Healthcare => "#10b981",
            Category::Utilities => "#06b6d4",
            Category::Other => "#6b7280",
        }
    }

    /// Display color for an arbitrary category label; labels outside the
    /// fixed set get the default (Other) color.
    pub fn color_for(label: &str) -> &'static str {
        label
            .parse::<Category>()
            .unwrap_or(Category::Other)
            .color()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Food & Dining" => Ok(Category::FoodDining),
            "Transportation" => Ok(Category::Transportation),
            "Shopping" => Ok(Category::Shopping),
            "Entertainment" => Ok(Category::Entertainment),
            "Healthcare" => Ok(Category::Healthcare),
            "Utilities" => Ok(Category::Utilities),
            "Other" => Ok(Category::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Keyword rules checked in order; the first match wins.
const RULES: &[(&str, Category)] = &[
    ("restaurant", Category::FoodDining),
    ("food", Category::FoodDining),
    ("dining", Category::FoodDining),
    ("coffee", Category::FoodDining),
    ("starbucks", Category::FoodDining),
    ("mcdonalds", Category::FoodDining),
    ("grocery", Category::FoodDining),
    ("uber", Category::Transportation),
    ("lyft", Category::Transportation),
    ("gas", Category::Transportation),
    ("fuel", Category::Transportation),
    ("transit", Category::Transportation),
    ("amazon", Category::Shopping),
    ("target", Category::Shopping),
    ("walmart", Category::Shopping),
    ("netflix", Category::Entertainment),
    ("spotify", Category::Entertainment),
    ("movie", Category::Entertainment),
    ("hospital", Category::Healthcare),
    ("doctor", Category::Healthcare),
    ("pharmacy", Category::Healthcare),
    ("electric", Category::Utilities),
    ("water", Category::Utilities),
    ("internet", Category::Utilities),
];

/// Categorize a transaction from its description and merchant name.
///
/// Case-insensitive substring match against the concatenated text. Total
/// over its input domain: anything unmatched (including empty input) is
/// `Other`. An explicit provider-supplied category takes precedence over
/// this function; callers apply that before consulting the rule table.
pub fn categorize(description: &str, merchant_name: &str) -> Category {
    let haystack = format!("{} {}", description, merchant_name).to_lowercase();

    for (keyword, category) in RULES {
        if haystack.contains(keyword) {
            return *category;
        }
    }

    Category::Other
}
