//! Error types for the product catalog

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Catalog JSON is malformed
    #[error("Invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A product points at a brand or category that does not exist
    #[error("Product '{product}' references unknown {kind} '{id}'")]
    UnknownReference {
        /// Product id
        product: String,
        /// `brand` or `category`
        kind: &'static str,
        /// Missing id
        id: String,
    },

    /// Two entries share an id
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId {
        /// `product`, `brand` or `category`
        kind: &'static str,
        /// Repeated id
        id: String,
    },

    /// Page size of zero
    #[error("Page size must be at least 1")]
    InvalidPageSize,
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
