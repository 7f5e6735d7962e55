//! Error types for query string handling
//!
//! Reading a query string never fails: malformed values are carried through
//! verbatim. These errors only come from converting user-facing names
//! (replay scripts, CLI arguments) into typed keys and values.

use thiserror::Error;

/// Errors produced while interpreting filter keys and values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The name does not match any known filter key
    #[error("Unknown filter key '{0}'")]
    UnknownKey(String),

    /// The value is not one of the supported sort orders
    #[error("Unknown sort order '{0}'")]
    UnknownSortOrder(String),

    /// Page numbers are 1-based positive integers
    #[error("Invalid page '{0}': expected a positive integer")]
    InvalidPage(String),

    /// The key exists but cannot be used for the requested operation
    #[error("Key '{key}' {reason}")]
    WrongKeyKind {
        key: &'static str,
        reason: &'static str,
    },
}

/// Result alias for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
