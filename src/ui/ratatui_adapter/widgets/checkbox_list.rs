//! Checkbox list for brand or category filters

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// One checkbox row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxItem<'a> {
    pub label: &'a str,
    pub checked: bool,
}

/// List of checkboxes with a cursor
pub struct CheckboxList<'a> {
    items: Vec<CheckboxItem<'a>>,
    cursor: usize,
    title: String,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> CheckboxList<'a> {
    /// Create a checkbox list; the title shows how many boxes are checked
    #[must_use]
    pub fn new(title: &str, items: Vec<CheckboxItem<'a>>, cursor: usize, theme: &'a Theme) -> Self {
        let checked = items.iter().filter(|item| item.checked).count();
        let title = if checked == 0 {
            format!(" {title} ")
        } else {
            format!(" {title} ({checked}) ")
        };
        Self {
            items,
            cursor,
            title,
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

    fn render_item(&self, item: CheckboxItem<'a>, is_cursor: bool) -> ListItem<'a> {
        let (mark, mark_style) = if item.checked {
            ("[x]", self.theme.checked_style())
        } else {
            ("[ ]", self.theme.dimmed_style())
        };
        let line = Line::from(vec![
            Span::styled(mark, mark_style),
            Span::raw(" "),
            Span::raw(item.label),
        ]);

        if is_cursor && self.focused {
            ListItem::new(line).style(self.theme.selected_style())
        } else {
            ListItem::new(line)
        }
    }
}

impl Widget for CheckboxList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style_for(self.focused))
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let visible = inner.height as usize;
        let start = self.cursor.saturating_sub(visible.saturating_sub(1));
        let rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(idx, item)| self.render_item(*item, idx == self.cursor))
            .collect();

        List::new(rows).render(inner, buf);
    }
}
