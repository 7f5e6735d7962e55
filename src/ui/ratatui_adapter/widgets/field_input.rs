//! Single-line input bound to one text filter

use crate::sync::FieldView;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Input box showing a field's display value
///
/// Text that has not reached the URL yet is drawn in the editing style and
/// the title gains a `*`.
pub struct FieldInput<'a> {
    field: &'a FieldView,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> FieldInput<'a> {
    #[must_use]
    pub const fn new(field: &'a FieldView, theme: &'a Theme) -> Self {
        Self {
            field,
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

impl Widget for FieldInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let marker = if self.field.is_editing { "*" } else { "" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style_for(self.focused))
            .title(format!(" {}{marker} ", self.field.key.label()));

        let inner = block.inner(area);
        block.render(area, buf);

        let text_style = if self.field.is_editing {
            self.theme.editing_style()
        } else {
            self.theme.normal_style()
        };
        let mut spans = vec![Span::styled(self.field.value.as_str(), text_style)];
        if self.focused {
            spans.push(Span::styled(
                "│",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
