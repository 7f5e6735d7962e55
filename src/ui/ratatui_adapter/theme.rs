//! Color theme definitions for the ratatui TUI

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the highlighted row
    pub selection_bg: Color,
    /// Foreground color for the highlighted row
    pub selection_fg: Color,
    /// Border of the focused pane
    pub focus: Color,
    /// Checked checkboxes
    pub checked: Color,
    /// Field text that has not been written to the URL yet
    pub editing: Color,
    /// Prices
    pub price: Color,
    /// The query string bar
    pub query: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    /// Unfocused borders
    pub border: Color,
    /// Dimmed/inactive text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            focus: Color::Cyan,
            checked: Color::Green,
            editing: Color::Yellow,
            price: Color::Green,
            query: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the highlighted row
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for ordinary text
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Border style for a pane, brighter when focused
    #[must_use]
    pub fn border_style_for(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for a checked box
    #[must_use]
    pub fn checked_style(&self) -> Style {
        Style::default()
            .fg(self.checked)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for uncommitted field text
    #[must_use]
    pub fn editing_style(&self) -> Style {
        Style::default()
            .fg(self.editing)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for prices
    #[must_use]
    pub fn price_style(&self) -> Style {
        Style::default().fg(self.price)
    }

    /// Style for the query string
    #[must_use]
    pub fn query_style(&self) -> Style {
        Style::default().fg(self.query)
    }

    #[must_use]
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
