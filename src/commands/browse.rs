//! Browse command - interactive filter panel over the catalog

use crate::{
    Result,
    catalog::MemoryCatalog,
    config::AppConfig,
    store::{MemoryRouter, QueryStore},
    ui::{BrowseApp, OutputWriter},
};
use tracing::info;

/// Execute the browse command
///
/// Prints the query string the session ended on, so the result can be piped
/// into `products` or `parse`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the terminal UI fails.
pub fn execute(
    config: &AppConfig,
    query: Option<&str>,
    debounce_ms: Option<u64>,
    out: &dyn OutputWriter,
) -> Result<()> {
    let catalog = MemoryCatalog::from_settings(&config.catalog)?;
    let router = MemoryRouter::new(query.unwrap_or_default());
    let settings = debounce_ms.map_or_else(
        || config.sync.clone(),
        |ms| config.sync.clone().with_debounce_ms(ms),
    );
    info!(
        products = catalog.product_count(),
        debounce_ms = settings.debounce_ms,
        "opening browse screen"
    );

    BrowseApp::new(config.ui.clone()).run(&router, &catalog, settings)?;

    router.settle();
    out.write(&router.current().to_href());
    Ok(())
}
