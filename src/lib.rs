//! Catalog filters - URL-synchronized filter controls for a product catalog
//!
//! This library keeps a set of filter inputs (search text, price bounds,
//! brand and category checkboxes, sort order, pagination) in sync with a URL
//! query string, which stays the single source of truth.
//!
//! - [`query`]: the query-string data model and codec
//! - [`store`]: the navigation boundary and an in-memory router
//! - [`sync`]: debounced fields, immediate toggles and the panel coordinator
//! - [`catalog`]: the product data collaborator
//! - [`ui`]: the interactive browse screen and output writers

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod query;
pub mod store;
pub mod sync;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AppError {
    /// Query string error
    #[error("Query error: {0}")]
    Query(#[from] query::QueryError),
    /// Filter synchronization error
    #[error("Filter error: {0}")]
    Sync(#[from] sync::SyncError),
    /// Navigation refused by the router
    #[error("Navigation error: {0}")]
    Navigation(#[from] store::NavigationError),
    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),
    /// Replay script could not be parsed
    #[error("Invalid script: {0}")]
    Script(#[from] toml::de::Error),
    /// Replay script step names no action, or more than one
    #[error("Invalid script: step {step}: {source}")]
    ScriptStep {
        step: usize,
        #[source]
        source: commands::replay::StepError,
    },
    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;
