//! Catalog records and the sanitized product query

use crate::query::{FilterKey, QuerySnapshot, SortOrder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A brand shown in the brand checkbox list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
}

/// A category shown in the category checkbox list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub brand_id: String,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
}

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total_pages: u32,
    pub total_items: usize,
}

/// Typed product filter built from a query snapshot
///
/// The URL carries raw text; this is where it gets interpreted. Values that
/// do not parse are ignored rather than rejected, so a hand-edited URL still
/// shows results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductQuery {
    /// Case-insensitive title substring
    pub search: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    /// Allowed brands (empty means any)
    pub brand_ids: Vec<String>,
    /// Allowed categories (empty means any)
    pub category_ids: Vec<String>,
    pub sort: SortOrder,
    /// 1-based page
    pub page: u32,
}

impl ProductQuery {
    /// Interpret a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &QuerySnapshot) -> Self {
        let owned = |key| {
            snapshot
                .ids(key)
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        Self {
            search: snapshot
                .get(FilterKey::Search)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            min_price: parse_price(snapshot.get(FilterKey::MinPrice)),
            max_price: parse_price(snapshot.get(FilterKey::MaxPrice)),
            brand_ids: owned(FilterKey::BrandId),
            category_ids: owned(FilterKey::CategoryId),
            sort: snapshot.sort(),
            page: snapshot.page(),
        }
    }

    /// Whether `product` passes every filter
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = &self.search
            && !product
                .title
                .to_lowercase()
                .contains(&search.to_lowercase())
        {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if !self.brand_ids.is_empty() && !self.brand_ids.contains(&product.brand_id) {
            return false;
        }
        self.category_ids.is_empty() || self.category_ids.contains(&product.category_id)
    }
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw?.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
