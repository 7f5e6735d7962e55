//! In-memory catalog backed by a JSON document
//!
//! The document has three arrays, `brands`, `categories` and `products`,
//! using the same camelCase field names as the query string. Without a data
//! file the built-in sample catalog is used.

use super::error::{CatalogError, Result};
use super::traits::CatalogService;
use super::types::{Brand, Category, Product, ProductPage, ProductQuery};
use crate::config::CatalogSettings;
use crate::query::SortOrder;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

const SAMPLE_CATALOG: &str = include_str!("sample.json");

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    brands: Vec<Brand>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<Product>,
}

/// Catalog held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    brands: Vec<Brand>,
    categories: Vec<Category>,
    products: Vec<Product>,
    page_size: usize,
}

impl MemoryCatalog {
    /// Build a catalog, checking ids and references
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPageSize` for a zero page size,
    /// `CatalogError::DuplicateId` if an id repeats, or
    /// `CatalogError::UnknownReference` if a product names a missing brand or
    /// category.
    pub fn new(
        brands: Vec<Brand>,
        categories: Vec<Category>,
        products: Vec<Product>,
        page_size: usize,
    ) -> Result<Self> {
        if page_size == 0 {
            return Err(CatalogError::InvalidPageSize);
        }

        let brand_ids = unique_ids("brand", brands.iter().map(|b| b.id.as_str()))?;
        let category_ids = unique_ids("category", categories.iter().map(|c| c.id.as_str()))?;
        unique_ids("product", products.iter().map(|p| p.id.as_str()))?;

        for product in &products {
            if !brand_ids.contains(product.brand_id.as_str()) {
                return Err(CatalogError::UnknownReference {
                    product: product.id.clone(),
                    kind: "brand",
                    id: product.brand_id.clone(),
                });
            }
            if !category_ids.contains(product.category_id.as_str()) {
                return Err(CatalogError::UnknownReference {
                    product: product.id.clone(),
                    kind: "category",
                    id: product.category_id.clone(),
                });
            }
        }

        Ok(Self {
            brands,
            categories,
            products,
            page_size,
        })
    }

    /// Parse a catalog document
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or any error from
    /// [`MemoryCatalog::new`].
    pub fn from_json(json: &str, page_size: usize) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(
            document.brands,
            document.categories,
            document.products,
            page_size,
        )
    }

    /// Load a catalog document from disk
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or any error
    /// from [`MemoryCatalog::from_json`].
    pub fn load(path: &Path, page_size: usize) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json, page_size)?;
        debug!(path = %path.display(), products = catalog.products.len(), "catalog loaded");
        Ok(catalog)
    }

    /// The built-in sample catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPageSize` for a zero page size.
    pub fn sample(page_size: usize) -> Result<Self> {
        Self::from_json(SAMPLE_CATALOG, page_size)
    }

    /// The configured data file, or the sample when none is set
    ///
    /// # Errors
    ///
    /// Returns any error from [`MemoryCatalog::load`] or [`MemoryCatalog::sample`].
    pub fn from_settings(settings: &CatalogSettings) -> Result<Self> {
        match &settings.data_file {
            Some(path) => Self::load(path, settings.page_size),
            None => Self::sample(settings.page_size),
        }
    }

    /// Products per page
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of products
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Name of a brand by id
    #[must_use]
    pub fn brand_name(&self, id: &str) -> Option<&str> {
        self.brands
            .iter()
            .find(|brand| brand.id == id)
            .map(|brand| brand.name.as_str())
    }
}

fn unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

fn compare(order: SortOrder, a: &Product, b: &Product) -> Ordering {
    let primary = match order {
        SortOrder::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortOrder::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortOrder::PriceAsc => a.price.total_cmp(&b.price),
        SortOrder::PriceDesc => b.price.total_cmp(&a.price),
        SortOrder::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortOrder::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

impl CatalogService for MemoryCatalog {
    fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        let mut matching: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| query.matches(product))
            .collect();
        matching.sort_by(|a, b| compare(query.sort, a, b));

        let total_items = matching.len();
        let total_pages = u32::try_from(total_items.div_ceil(self.page_size).max(1))
            .unwrap_or(u32::MAX);
        let skip = usize::try_from(query.page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(self.page_size);

        let items = matching
            .into_iter()
            .skip(skip)
            .take(self.page_size)
            .cloned()
            .collect();

        Ok(ProductPage {
            items,
            total_pages,
            total_items,
        })
    }

    fn fetch_brands(&self) -> Result<Vec<Brand>> {
        Ok(self.brands.clone())
    }

    fn fetch_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }
}
