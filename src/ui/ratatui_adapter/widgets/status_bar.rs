//! Status bar widget for notices

use crate::ui::output::MessageLevel;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shows the latest notice on the left and the filter summary on the right
pub struct StatusBar<'a> {
    message: Option<(MessageLevel, &'a str)>,
    active_filters: usize,
    pending: bool,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(message: Option<(MessageLevel, &'a str)>, theme: &'a Theme) -> Self {
        Self {
            message,
            active_filters: 0,
            pending: false,
            theme,
        }
    }

    /// Number of active filters to display
    #[must_use]
    pub const fn active_filters(mut self, count: usize) -> Self {
        self.active_filters = count;
        self
    }

    /// Whether a debounced write is waiting
    #[must_use]
    pub const fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }

    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
            MessageLevel::Normal => self.theme.normal_style(),
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }

    fn summary(&self) -> String {
        let filters = match self.active_filters {
            0 => "no filters".to_string(),
            1 => "1 filter".to_string(),
            n => format!("{n} filters"),
        };
        if self.pending {
            format!("{filters} · typing…")
        } else {
            filters
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style_for(false))
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(inner);

        if let Some((level, text)) = self.message {
            let style = self.style_for_level(level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(level), style),
                Span::styled(text, style),
            ]);
            Paragraph::new(line).render(chunks[0], buf);
        }

        Paragraph::new(Line::styled(self.summary(), self.theme.dimmed_style()))
            .alignment(ratatui::layout::Alignment::Right)
            .render(chunks[1], buf);
    }
}
