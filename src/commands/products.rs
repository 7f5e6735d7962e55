//! Products command - list the products a query string selects

use crate::{
    Result,
    catalog::{CatalogService, MemoryCatalog, ProductQuery},
    output,
    query::QuerySnapshot,
    ui::output::OutputWriter,
};

/// Execute the products command
///
/// # Errors
///
/// Returns `AppError::Catalog` if the catalog query fails, or
/// `AppError::Json` if JSON output cannot be produced.
pub fn execute(
    catalog: &MemoryCatalog,
    query: Option<&str>,
    json: bool,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    let snapshot = QuerySnapshot::parse(query.unwrap_or_default());
    let product_query = ProductQuery::from_snapshot(&snapshot);
    let page = catalog.fetch_products(&product_query)?;

    if json {
        out.write(&serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.items.is_empty() {
        out.info("No products match these filters.");
    } else {
        for product in &page.items {
            out.write(&output::product_line(
                product,
                catalog.brand_name(&product.brand_id),
                quiet,
            ));
        }
    }

    out.info(&format!(
        "page {} of {} ({} product(s))",
        product_query.page, page.total_pages, page.total_items
    ));
    Ok(())
}
