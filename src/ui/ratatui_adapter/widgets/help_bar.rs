//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "Tab", "ctrl+x")
    pub key: &'static str,
    /// Action description
    pub action: &'static str,
}

impl KeyHint {
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints shown on the browse screen
    pub const DEFAULT_HINTS: [KeyHint; 6] = [
        KeyHint::new("Tab", "next pane"),
        KeyHint::new("Space", "toggle"),
        KeyHint::new("ctrl+s", "sort"),
        KeyHint::new("PgUp/PgDn", "page"),
        KeyHint::new("ctrl+x", "clear"),
        KeyHint::new("F1", "help"),
    ];
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key, self.theme.query_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
