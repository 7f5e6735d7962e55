//! Navigation error types

use thiserror::Error;

/// Errors reported by a navigation layer when asked to change the URL
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The router refused the navigation
    #[error("Navigation to '{href}' was rejected: {reason}")]
    Rejected { href: String, reason: String },

    /// The router is gone (page unloading, test harness torn down)
    #[error("Navigation layer is unavailable")]
    Unavailable,
}

/// Result alias for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;
