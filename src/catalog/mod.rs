//! Product catalog collaborator
//!
//! Supplies the brand and category lists rendered as checkboxes and the
//! product pages shown for the current query. [`ProductQuery`] is the one
//! place where raw query-string values are sanitized.

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::CatalogError;
pub use memory::MemoryCatalog;
pub use traits::CatalogService;
pub use types::{Brand, Category, Product, ProductPage, ProductQuery};
