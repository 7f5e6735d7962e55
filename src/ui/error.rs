//! UI error types

use crate::catalog::CatalogError;
use crate::sync::SyncError;
use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal I/O failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The filter panel rejected an operation
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Results could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_errors_pass_through() {
        let err: UiError = SyncError::Disposed.into();
        assert_eq!(err.to_string(), "Filter panel has been disposed");
    }

    #[test]
    fn test_io_error_is_prefixed() {
        let err: UiError = std::io::Error::other("no tty").into();
        assert_eq!(err.to_string(), "IO error: no tty");
    }
}
