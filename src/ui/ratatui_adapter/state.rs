//! Browse screen state that is not part of the URL
//!
//! Cursor positions, focus and the cached result page live here. Filter
//! values do not: they are always read from the panel.

use crate::catalog::{Brand, CatalogService, Category, ProductPage, ProductQuery, error::Result};
use crate::query::{FilterKey, QuerySnapshot};

/// Which pane receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// A text field
    Field(FilterKey),
    /// Brand checkboxes
    Brands,
    /// Category checkboxes
    Categories,
    /// Result list
    Products,
}

impl Focus {
    /// Tab order
    pub const ORDER: [Self; 6] = [
        Self::Field(FilterKey::Search),
        Self::Field(FilterKey::MinPrice),
        Self::Field(FilterKey::MaxPrice),
        Self::Brands,
        Self::Categories,
        Self::Products,
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or_default()
    }

    /// Next pane in tab order
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Previous pane in tab order
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// State of the browse screen
#[derive(Debug, Clone)]
pub struct BrowseState {
    pub focus: Focus,
    pub brands: Vec<Brand>,
    pub categories: Vec<Category>,
    pub brand_cursor: usize,
    pub category_cursor: usize,
    pub product_cursor: usize,
    /// Results for `results_href`
    pub results: ProductPage,
    results_href: Option<String>,
    /// Help overlay visible
    pub show_help: bool,
}

impl BrowseState {
    /// Create state for the given checkbox lists, focused on the search box
    #[must_use]
    pub fn new(brands: Vec<Brand>, categories: Vec<Category>) -> Self {
        Self {
            focus: Focus::Field(FilterKey::Search),
            brands,
            categories,
            brand_cursor: 0,
            category_cursor: 0,
            product_cursor: 0,
            results: ProductPage {
                items: Vec::new(),
                total_pages: 1,
                total_items: 0,
            },
            results_href: None,
            show_help: false,
        }
    }

    fn focused_list(&mut self) -> Option<(&mut usize, usize)> {
        match self.focus {
            Focus::Brands => Some((&mut self.brand_cursor, self.brands.len())),
            Focus::Categories => Some((&mut self.category_cursor, self.categories.len())),
            Focus::Products => Some((&mut self.product_cursor, self.results.items.len())),
            Focus::Field(_) => None,
        }
    }

    /// Move the focused list's cursor up
    pub fn cursor_up(&mut self) {
        if let Some((cursor, _)) = self.focused_list() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Move the focused list's cursor down
    pub fn cursor_down(&mut self) {
        if let Some((cursor, len)) = self.focused_list()
            && *cursor + 1 < len
        {
            *cursor += 1;
        }
    }

    /// The checkbox under the cursor, if a checkbox list has focus
    #[must_use]
    pub fn current_checkbox(&self) -> Option<(FilterKey, &str)> {
        match self.focus {
            Focus::Brands => self
                .brands
                .get(self.brand_cursor)
                .map(|brand| (FilterKey::BrandId, brand.id.as_str())),
            Focus::Categories => self
                .categories
                .get(self.category_cursor)
                .map(|category| (FilterKey::CategoryId, category.id.as_str())),
            _ => None,
        }
    }

    /// Refetch results when `snapshot` differs from the one they were fetched for
    ///
    /// Returns whether a fetch happened.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog query fails.
    pub fn refresh(&mut self, catalog: &impl CatalogService, snapshot: &QuerySnapshot) -> Result<bool> {
        let href = snapshot.to_href();
        if self.results_href.as_deref() == Some(href.as_str()) {
            return Ok(false);
        }
        self.results = catalog.fetch_products(&ProductQuery::from_snapshot(snapshot))?;
        self.results_href = Some(href);
        self.product_cursor = 0;
        Ok(true)
    }
}
