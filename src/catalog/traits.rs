//! Catalog service boundary

use super::error::Result;
use super::types::{Brand, Category, ProductPage, ProductQuery};

/// Source of products and of the brand/category lists behind the checkboxes
///
/// The filter core never calls this; it only renders what the front end
/// fetched for the current snapshot.
pub trait CatalogService {
    /// One page of products matching `query`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backing store fails.
    fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage>;

    /// Every brand, in display order
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backing store fails.
    fn fetch_brands(&self) -> Result<Vec<Brand>>;

    /// Every category, in display order
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backing store fails.
    fn fetch_categories(&self) -> Result<Vec<Category>>;
}

impl<T: CatalogService + ?Sized> CatalogService for &T {
    fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        (**self).fetch_products(query)
    }

    fn fetch_brands(&self) -> Result<Vec<Brand>> {
        (**self).fetch_brands()
    }

    fn fetch_categories(&self) -> Result<Vec<Category>> {
        (**self).fetch_categories()
    }
}
