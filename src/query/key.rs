//! Filter keys and enumerated values of the catalog query string
//!
//! The catalog URL carries a fixed set of keys. Declaration order of
//! [`FilterKey`] is also the canonical order keys are written in, so the same
//! filters always produce the same query string.

use super::error::{QueryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value of the `page` key for the first page of results
pub const FIRST_PAGE: &str = "1";

/// A key of the catalog query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    /// Free-text search
    Search,
    /// Lower price bound (decimal string)
    MinPrice,
    /// Upper price bound (decimal string)
    MaxPrice,
    /// Selected brand ids (comma-separated)
    BrandId,
    /// Selected category ids (comma-separated)
    CategoryId,
    /// Sort order
    Sort,
    /// 1-based result page
    Page,
}

impl FilterKey {
    /// All keys in canonical order
    pub const ALL: [Self; 7] = [
        Self::Search,
        Self::MinPrice,
        Self::MaxPrice,
        Self::BrandId,
        Self::CategoryId,
        Self::Sort,
        Self::Page,
    ];

    /// Keys edited through a debounced text input
    pub const TEXT_FIELDS: [Self; 3] = [Self::Search, Self::MinPrice, Self::MaxPrice];

    /// Keys edited through a set of checkboxes
    pub const TOGGLE_SETS: [Self; 2] = [Self::BrandId, Self::CategoryId];

    /// Name of the key as it appears in the query string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::MinPrice => "minPrice",
            Self::MaxPrice => "maxPrice",
            Self::BrandId => "brandId",
            Self::CategoryId => "categoryId",
            Self::Sort => "sort",
            Self::Page => "page",
        }
    }

    /// Look up a key by its query string name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// Whether the value is a comma-separated list of ids
    #[must_use]
    pub const fn is_multi_valued(self) -> bool {
        matches!(self, Self::BrandId | Self::CategoryId)
    }

    /// Whether edits to this key go through a debounce window
    #[must_use]
    pub const fn is_debounced(self) -> bool {
        matches!(self, Self::Search | Self::MinPrice | Self::MaxPrice)
    }

    /// Whether this key narrows the result set
    ///
    /// `sort` and `page` change presentation only.
    #[must_use]
    pub const fn is_filter(self) -> bool {
        !matches!(self, Self::Sort | Self::Page)
    }

    /// Human-readable label for widgets
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::MinPrice => "Min price",
            Self::MaxPrice => "Max price",
            Self::BrandId => "Brands",
            Self::CategoryId => "Categories",
            Self::Sort => "Sort",
            Self::Page => "Page",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| QueryError::UnknownKey(s.to_string()))
    }
}

/// Sort order accepted by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first
    #[default]
    CreatedDesc,
    /// Oldest first
    CreatedAsc,
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Title A-Z
    TitleAsc,
    /// Title Z-A
    TitleDesc,
}

impl SortOrder {
    /// All sort orders in menu order
    pub const ALL: [Self; 6] = [
        Self::CreatedDesc,
        Self::CreatedAsc,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::TitleAsc,
        Self::TitleDesc,
    ];

    /// Query string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedDesc => "created_desc",
            Self::CreatedAsc => "created_asc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
        }
    }

    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreatedDesc => "Newest",
            Self::CreatedAsc => "Oldest",
            Self::PriceAsc => "Price: low to high",
            Self::PriceDesc => "Price: high to low",
            Self::TitleAsc => "Title: A-Z",
            Self::TitleDesc => "Title: Z-A",
        }
    }

    /// The next order in menu order, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| QueryError::UnknownSortOrder(s.to_string()))
    }
}

/// Parse a page value, rejecting zero, negatives and non-numbers
///
/// # Errors
///
/// Returns `QueryError::InvalidPage` if `raw` is not a positive integer.
pub fn parse_page(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(QueryError::InvalidPage(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        for key in FilterKey::ALL {
            assert_eq!(key.as_str().parse::<FilterKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = "color".parse::<FilterKey>().unwrap_err();
        assert_eq!(err, QueryError::UnknownKey("color".to_string()));
        assert_eq!(err.to_string(), "Unknown filter key 'color'");
    }

    #[test]
    fn test_key_kinds() {
        assert!(FilterKey::BrandId.is_multi_valued());
        assert!(FilterKey::CategoryId.is_multi_valued());
        assert!(!FilterKey::Search.is_multi_valued());
        assert!(FilterKey::MinPrice.is_debounced());
        assert!(!FilterKey::Sort.is_debounced());
        assert!(!FilterKey::Page.is_filter());
        assert!(FilterKey::BrandId.is_filter());
    }

    #[test]
    fn test_canonical_order_follows_declaration() {
        let mut keys = vec![FilterKey::Page, FilterKey::Search, FilterKey::BrandId];
        keys.sort();
        assert_eq!(keys, vec![FilterKey::Search, FilterKey::BrandId, FilterKey::Page]);
    }

    #[test]
    fn test_sort_order_default_and_parse() {
        assert_eq!(SortOrder::default(), SortOrder::CreatedDesc);
        assert_eq!("price_asc".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_sort_order_next_wraps() {
        assert_eq!(SortOrder::CreatedDesc.next(), SortOrder::CreatedAsc);
        assert_eq!(SortOrder::TitleDesc.next(), SortOrder::CreatedDesc);
    }

    #[test]
    fn test_sort_order_serde_names() {
        let json = serde_json::to_string(&SortOrder::TitleAsc).unwrap();
        assert_eq!(json, "\"title_asc\"");
        let key: FilterKey = serde_json::from_str("\"minPrice\"").unwrap();
        assert_eq!(key, FilterKey::MinPrice);
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page("3").unwrap(), 3);
        assert!(parse_page("0").is_err());
        assert!(parse_page("-2").is_err());
        assert!(parse_page("two").is_err());
    }
}
