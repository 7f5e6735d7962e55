//! Result list for the current query

use crate::catalog::ProductPage;
use crate::output::format_price;
use crate::query::SortOrder;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// Products of the current result page
pub struct ProductList<'a> {
    page: &'a ProductPage,
    current_page: u32,
    sort: SortOrder,
    cursor: usize,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> ProductList<'a> {
    #[must_use]
    pub const fn new(
        page: &'a ProductPage,
        current_page: u32,
        sort: SortOrder,
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            page,
            current_page,
            sort,
            cursor,
            theme,
            focused: false,
        }
    }

    /// Set focus state
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for ProductList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            " Products {} · page {}/{} · {} ",
            self.page.total_items,
            self.current_page,
            self.page.total_pages,
            self.sort.label()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style_for(self.focused))
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if self.page.items.is_empty() {
            Line::styled("No products match these filters", self.theme.dimmed_style())
                .render(inner, buf);
            return;
        }

        let title_width = usize::from(inner.width.saturating_sub(12)).max(8);
        let rows: Vec<ListItem> = self
            .page
            .items
            .iter()
            .enumerate()
            .map(|(idx, product)| {
                let line = Line::from(vec![
                    Span::raw(format!("{:<title_width$}", product.title)),
                    Span::styled(format!("{:>10}", format_price(product.price)), self.theme.price_style()),
                ]);
                if idx == self.cursor && self.focused {
                    ListItem::new(line).style(self.theme.selected_style())
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        List::new(rows).render(inner, buf);
    }
}
