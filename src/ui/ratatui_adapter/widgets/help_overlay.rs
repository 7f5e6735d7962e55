//! Help overlay widget with the full keybind reference

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Panes",
        &[
            ("Tab / Shift+Tab", "Next / previous pane"),
            ("↑/↓  j/k", "Move cursor"),
            ("Space / Enter", "Toggle checkbox"),
            ("Esc / Ctrl+C", "Quit"),
        ],
    ),
    (
        "Filters",
        &[
            ("Type", "Edit the focused field"),
            ("Backspace", "Delete a character"),
            ("Ctrl+U", "Clear the field"),
            ("Ctrl+X", "Clear all filters"),
            ("Ctrl+S", "Next sort order"),
        ],
    ),
    (
        "Results",
        &[
            ("PgDn / Ctrl+N", "Next page"),
            ("PgUp / Ctrl+P", "Previous page"),
            ("Alt+←/→", "History back / forward"),
        ],
    ),
];

/// Centered help screen
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
        let popup_layout = Layout::vertical([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .split(area);

        Layout::horizontal([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(popup_layout[1])[1]
    }

    fn build_content(&self) -> Vec<Line<'static>> {
        let heading = self.theme.query_style().add_modifier(Modifier::UNDERLINED);
        let mut lines = Vec::new();

        for (title, binds) in SECTIONS {
            lines.push(Line::default());
            lines.push(Line::styled(format!("  {title}"), heading));
            lines.push(Line::default());
            for (key, desc) in binds {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:<18}"), self.theme.info_style()),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::default());
        lines.push(Line::styled("  Press any key to close", self.theme.dimmed_style()));
        lines
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = Self::centered_rect(60, 80, area);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style_for(true))
            .title(" Help ")
            .title_alignment(Alignment::Center);

        Paragraph::new(self.build_content()).block(block).render(popup_area, buf);
    }
}
