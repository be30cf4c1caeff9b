//! Filter/Sort Engine
//!
//! Takes the full card collection and the active selections, returns the
//! visible cards in display order. Pure: no control lookups, no mutation of
//! the collection. Re-filtering always starts again from the full set.
//!
//! Selections arrive as the raw values of the three selects on the
//! inventory page:
//! - category: `"all"` or a category tag
//! - price: `"all"`, `"min-max"` or `"min+"`
//! - sort: `"featured"`, `"price-low"`, `"price-high"` or `"year"`

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::VehicleCard;

/// Invalid raw control values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid price range '{0}': expected 'all', 'min-max' or 'min+'")]
    InvalidPriceRange(String),

    #[error("unknown sort key '{0}': expected featured, price-low, price-high or year")]
    UnknownSortKey(String),
}

// ============================================================================
// Category
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Absent, empty and "all" all mean no filtering on this axis
    pub fn from_control(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(tag) => CategoryFilter::Only(tag.to_string()),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(tag) => tag == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(tag) => f.write_str(tag),
        }
    }
}

// ============================================================================
// Price Range
// ============================================================================

/// Price bucket from the price select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceRange {
    #[default]
    All,
    /// Inclusive on both ends
    Between { min: i64, max: i64 },
    /// Open-ended bucket, written "min+"
    AtLeast { min: i64 },
}

impl PriceRange {
    /// Cards without a numeric price never match a bounded bucket
    pub fn contains(&self, price: Option<i64>) -> bool {
        match (self, price) {
            (PriceRange::All, _) => true,
            (_, None) => false,
            (PriceRange::Between { min, max }, Some(p)) => *min <= p && p <= *max,
            (PriceRange::AtLeast { min }, Some(p)) => p >= *min,
        }
    }

    /// Absent or empty control means "all"
    pub fn from_control(value: Option<&str>) -> Result<Self, FilterError> {
        match value.map(str::trim) {
            None | Some("") => Ok(PriceRange::All),
            Some(raw) => raw.parse(),
        }
    }
}

impl FromStr for PriceRange {
    type Err = FilterError;

    /// Split on `-`, drop a trailing `+` from each token. A missing or empty
    /// second token makes the bucket open-ended.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw == "all" {
            return Ok(PriceRange::All);
        }

        let invalid = || FilterError::InvalidPriceRange(s.to_string());
        let mut tokens = raw.split('-').map(|t| t.trim().trim_end_matches('+'));

        let min: i64 = tokens
            .next()
            .filter(|t| !t.is_empty())
            .and_then(|t| t.parse().ok())
            .ok_or_else(invalid)?;
        let max = tokens.next().filter(|t| !t.is_empty());

        if tokens.next().is_some() {
            return Err(invalid());
        }

        match max {
            Some(t) => {
                let max: i64 = t.parse().map_err(|_| invalid())?;
                Ok(PriceRange::Between { min, max })
            }
            None => Ok(PriceRange::AtLeast { min }),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceRange::All => f.write_str("all"),
            PriceRange::Between { min, max } => write!(f, "{}-{}", min, max),
            PriceRange::AtLeast { min } => write!(f, "{}+", min),
        }
    }
}

// ============================================================================
// Sort Key
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Original page order
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Newest first. Cards carry no model year, so this orders by price
    /// descending, same as the live site.
    Year,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Year => "year",
        }
    }

    /// Absent or empty control means "featured"
    pub fn from_control(value: Option<&str>) -> Result<Self, FilterError> {
        match value.map(str::trim) {
            None | Some("") => Ok(SortKey::Featured),
            Some(raw) => raw.parse(),
        }
    }

    /// Priced cards always come before unpriced ones
    fn compare(&self, a: Option<i64>, b: Option<i64>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => match self {
                SortKey::Featured => Ordering::Equal,
                SortKey::PriceLow => a.cmp(&b),
                SortKey::PriceHigh | SortKey::Year => b.cmp(&a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Stable in-place sort of card positions
    pub(crate) fn sort_positions(&self, positions: &mut [usize], cards: &[VehicleCard]) {
        if *self == SortKey::Featured {
            return;
        }
        positions.sort_by(|&a, &b| self.compare(cards[a].price, cards[b].price));
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "featured" => Ok(SortKey::Featured),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "year" => Ok(SortKey::Year),
            other => Err(FilterError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Filter State
// ============================================================================

/// Active selections, rebuilt from the controls on every change
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub sort: SortKey,
}

impl FilterState {
    /// Build from the raw select values. Missing selects behave as if they
    /// were set to "all" / "featured".
    pub fn from_controls(
        category: Option<&str>,
        price_range: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            category: CategoryFilter::from_control(category),
            price_range: PriceRange::from_control(price_range)?,
            sort: SortKey::from_control(sort)?,
        })
    }

    pub fn matches(&self, card: &VehicleCard) -> bool {
        self.category.matches(&card.category) && self.price_range.contains(card.price)
    }

    /// Stable cache key, e.g. "suv|20000-30000|price-low"
    pub fn cache_key(&self) -> String {
        format!("{}|{}|{}", self.category, self.price_range, self.sort)
    }
}

/// Positions of the visible cards, in display order
pub(crate) fn visible_positions(cards: &[VehicleCard], state: &FilterState) -> Vec<usize> {
    let mut positions: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, card)| state.matches(card))
        .map(|(i, _)| i)
        .collect();
    state.sort.sort_positions(&mut positions, cards);
    positions
}

/// Filter and order the cards for display
///
/// Returns only the visible cards. Ties in the sort key keep their relative
/// order from `cards`.
pub fn apply<'a>(cards: &'a [VehicleCard], state: &FilterState) -> Vec<&'a VehicleCard> {
    visible_positions(cards, state)
        .into_iter()
        .map(|i| &cards[i])
        .collect()
}
