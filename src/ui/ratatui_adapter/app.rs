//! Browse screen: terminal setup, event loop and layout

use super::events::{EventResult, poll_and_handle};
use super::state::{BrowseState, Focus};
use super::theme::Theme;
use super::widgets::{
    CheckboxItem, CheckboxList, FieldInput, HelpBar, HelpOverlay, ProductList, QueryBar,
    StatusBar,
};
use crate::catalog::CatalogService;
use crate::config::{SyncSettings, UiSettings};
use crate::query::FilterKey;
use crate::store::{MemoryRouter, QueryStore};
use crate::sync::{Clock, FilterPanel, PanelView};
use crate::ui::error::Result;
use crate::ui::output::{MessageLevel, OutputWriter, StatusBarWriter};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
};
use std::io::{self, Stdout};
use tracing::{debug, info, warn};

/// Interactive filter panel over a catalog
pub struct BrowseApp {
    theme: Theme,
    ui: UiSettings,
}

impl BrowseApp {
    /// Create a browse screen with the default theme
    #[must_use]
    pub fn new(ui: UiSettings) -> Self {
        Self {
            theme: Theme::default(),
            ui,
        }
    }

    /// Set custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Run until the user quits
    ///
    /// The router keeps its history afterwards, so the caller can read the
    /// final URL from it.
    ///
    /// # Errors
    ///
    /// Returns `UiError` if the terminal cannot be driven, the catalog fails,
    /// or the panel rejects an operation.
    pub fn run(
        &self,
        router: &MemoryRouter,
        catalog: &impl CatalogService,
        settings: SyncSettings,
    ) -> Result<()> {
        let mut state = BrowseState::new(catalog.fetch_brands()?, catalog.fetch_categories()?);
        let mut panel = FilterPanel::builder()
            .store(router)
            .settings(settings)
            .build()?;

        let mut terminal = Self::setup_terminal()?;
        let result = self.run_loop(&mut terminal, router, catalog, &mut state, &mut panel);
        panel.dispose();
        Self::cleanup_terminal()?;
        result
    }

    fn run_loop<C: Clock>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        router: &MemoryRouter,
        catalog: &impl CatalogService,
        state: &mut BrowseState,
        panel: &mut FilterPanel<&MemoryRouter, C>,
    ) -> Result<()> {
        let status = StatusBarWriter::new();
        info!(href = %router.current().to_href(), "browse screen started");

        loop {
            router.settle();
            let outcome = panel.tick()?;
            if outcome.navigations > 0 {
                debug!(navigations = outcome.navigations, "tick committed");
            }
            for notice in panel.drain_notices() {
                status.notice(&notice);
            }

            let current = router.current();
            if let Err(e) = state.refresh(catalog, &current) {
                warn!(error = %e, "catalog query failed");
                status.error(&format!("Couldn't load products: {e}"));
            }

            let view = panel.view();
            let current_href = current.to_href();
            let message = status.latest_message();
            terminal.draw(|frame| {
                Screen {
                    view: &view,
                    state: &*state,
                    current_href: &current_href,
                    message: message.as_ref().map(|(level, text)| (*level, text.as_str())),
                    pending: panel.has_pending(),
                    show_query_bar: self.ui.show_query_bar,
                    theme: &self.theme,
                }
                .render(frame);
            })?;

            let now = panel.clock().now();
            let timeout = panel
                .next_deadline()
                .map_or(self.ui.tick(), |deadline| {
                    deadline.saturating_duration_since(now).min(self.ui.tick())
                });

            match poll_and_handle(state, panel, timeout)? {
                EventResult::Quit => break,
                EventResult::Back => {
                    if !router.back() {
                        status.info("No earlier page");
                    }
                }
                EventResult::Forward => {
                    if !router.forward() {
                        status.info("No later page");
                    }
                }
                EventResult::Continue | EventResult::Ignored => {}
            }
        }

        info!(href = %router.current().to_href(), "browse screen closed");
        Ok(())
    }
}

/// Everything one frame needs
pub struct Screen<'a> {
    pub view: &'a PanelView,
    pub state: &'a BrowseState,
    /// URL the page is showing
    pub current_href: &'a str,
    pub message: Option<(MessageLevel, &'a str)>,
    pub pending: bool,
    pub show_query_bar: bool,
    pub theme: &'a Theme,
}

impl Screen<'_> {
    /// Draw the browse screen into `frame`
    pub fn render(&self, frame: &mut Frame) {
        let query_height = u16::from(self.show_query_bar);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(query_height),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        if self.show_query_bar {
            frame.render_widget(
                QueryBar::new(self.current_href, &self.view.href, self.theme),
                rows[0],
            );
        }
        self.render_fields(frame, rows[1]);
        self.render_body(frame, rows[2]);

        frame.render_widget(
            StatusBar::new(self.message, self.theme)
                .active_filters(self.view.active_filters)
                .pending(self.pending),
            rows[3],
        );
        frame.render_widget(HelpBar::new(&HelpBar::DEFAULT_HINTS, self.theme), rows[4]);

        if self.state.show_help {
            frame.render_widget(HelpOverlay::new(self.theme), frame.area());
        }
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        for (field, column) in self.view.fields.iter().zip(columns.iter()) {
            let focused = self.state.focus == Focus::Field(field.key);
            frame.render_widget(FieldInput::new(field, self.theme).focused(focused), *column);
        }
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(22),
                Constraint::Percentage(22),
                Constraint::Percentage(56),
            ])
            .split(area);

        let brands = self
            .state
            .brands
            .iter()
            .map(|brand| CheckboxItem {
                label: &brand.name,
                checked: self.view.brand_ids.contains(&brand.id),
            })
            .collect();
        frame.render_widget(
            CheckboxList::new(FilterKey::BrandId.label(), brands, self.state.brand_cursor, self.theme)
                .focused(self.state.focus == Focus::Brands),
            columns[0],
        );

        let categories = self
            .state
            .categories
            .iter()
            .map(|category| CheckboxItem {
                label: &category.name,
                checked: self.view.category_ids.contains(&category.id),
            })
            .collect();
        frame.render_widget(
            CheckboxList::new(
                FilterKey::CategoryId.label(),
                categories,
                self.state.category_cursor,
                self.theme,
            )
            .focused(self.state.focus == Focus::Categories),
            columns[1],
        );

        frame.render_widget(
            ProductList::new(
                &self.state.results,
                self.view.page,
                self.view.sort,
                self.state.product_cursor,
                self.theme,
            )
            .focused(self.state.focus == Focus::Products),
            columns[2],
        );
    }
}
