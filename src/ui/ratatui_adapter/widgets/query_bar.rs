//! Address-bar style display of the query string

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Shows the URL the page is on and, while navigations are in flight, the
/// one it is heading to
pub struct QueryBar<'a> {
    current: &'a str,
    target: &'a str,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    #[must_use]
    pub const fn new(current: &'a str, target: &'a str, theme: &'a Theme) -> Self {
        Self {
            current,
            target,
            theme,
        }
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let shown = if self.current.is_empty() { "?" } else { self.current };
        let mut spans = vec![
            Span::styled("/catalog", self.theme.dimmed_style()),
            Span::styled(shown, self.theme.query_style()),
        ];
        if self.target != self.current {
            spans.push(Span::styled("  → ", self.theme.dimmed_style()));
            spans.push(Span::styled(self.target, self.theme.editing_style()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
