//! Synchronizer error types
//!
//! Navigation failures are not returned from panel operations; they are
//! handled by the configured [`NavigationErrorPolicy`](crate::config::NavigationErrorPolicy).
//! The variants here cover misuse of the panel API.

use crate::query::{FilterKey, QueryError};
use thiserror::Error;

/// Errors from filter panel operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Text input was sent to a key that is not a debounced text field
    #[error("'{0}' is not a text field")]
    NotATextField(FilterKey),

    /// A toggle was sent to a key that is not a multi-select list
    #[error("'{0}' is not a multi-select field")]
    NotAToggleSet(FilterKey),

    /// A toggled id would not survive as one list entry
    #[error("Invalid id {id:?} for '{key}': ids must be non-empty with no commas or whitespace")]
    InvalidId { key: FilterKey, id: String },

    /// A value could not be interpreted
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// The panel was used after `dispose`
    #[error("Filter panel has been disposed")]
    Disposed,

    /// The panel could not be constructed
    #[error("Failed to build filter panel: {0}")]
    BuildError(String),
}

/// Result alias for synchronizer operations
pub type Result<T> = std::result::Result<T, SyncError>;
