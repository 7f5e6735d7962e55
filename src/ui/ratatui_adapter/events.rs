//! Event handling for the ratatui TUI
//!
//! Maps key events to filter panel operations. Router history (back and
//! forward) is returned to the caller, which owns the router.

use super::state::{BrowseState, Focus};
use crate::store::QueryStore;
use crate::sync::{Clock, FilterPanel, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Keep running
    Continue,
    /// Leave the browse screen
    Quit,
    /// Browser back
    Back,
    /// Browser forward
    Forward,
    /// No action taken
    Ignored,
}

/// Handle one key press
///
/// # Errors
///
/// Returns `SyncError` if the panel rejects the operation.
pub fn handle_key<S: QueryStore, C: Clock>(
    state: &mut BrowseState,
    panel: &mut FilterPanel<S, C>,
    key: KeyEvent,
) -> Result<EventResult> {
    if state.show_help {
        state.show_help = false;
        return Ok(EventResult::Continue);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => return Ok(EventResult::Quit),
        KeyCode::Char('c') if ctrl => return Ok(EventResult::Quit),
        KeyCode::F(1) => {
            state.show_help = true;
            return Ok(EventResult::Continue);
        }
        KeyCode::Tab => {
            state.focus = state.focus.next();
            return Ok(EventResult::Continue);
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            return Ok(EventResult::Continue);
        }
        KeyCode::Left if alt => return Ok(EventResult::Back),
        KeyCode::Right if alt => return Ok(EventResult::Forward),
        KeyCode::Char('x') if ctrl => {
            panel.clear_filters()?;
            return Ok(EventResult::Continue);
        }
        KeyCode::Char('s') if ctrl => {
            let next = panel.sort().next();
            panel.set_sort(next)?;
            return Ok(EventResult::Continue);
        }
        KeyCode::PageDown => {
            panel.next_page(state.results.total_pages)?;
            return Ok(EventResult::Continue);
        }
        KeyCode::Char('n') if ctrl => {
            panel.next_page(state.results.total_pages)?;
            return Ok(EventResult::Continue);
        }
        KeyCode::PageUp => {
            panel.prev_page()?;
            return Ok(EventResult::Continue);
        }
        KeyCode::Char('p') if ctrl => {
            panel.prev_page()?;
            return Ok(EventResult::Continue);
        }
        _ => {}
    }

    match state.focus {
        Focus::Field(field) => handle_field_key(panel, field, key),
        Focus::Brands | Focus::Categories | Focus::Products => {
            handle_list_key(state, panel, key)
        }
    }
}

fn handle_field_key<S: QueryStore, C: Clock>(
    panel: &mut FilterPanel<S, C>,
    field: crate::query::FilterKey,
    key: KeyEvent,
) -> Result<EventResult> {
    let mut text = panel.display_value(field).unwrap_or_default().to_string();

    match (key.code, key.modifiers) {
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => text.clear(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => text.push(c),
        (KeyCode::Backspace, _) => {
            if text.pop().is_none() {
                return Ok(EventResult::Ignored);
            }
        }
        _ => return Ok(EventResult::Ignored),
    }

    panel.on_input_change(field, text)?;
    Ok(EventResult::Continue)
}

fn handle_list_key<S: QueryStore, C: Clock>(
    state: &mut BrowseState,
    panel: &mut FilterPanel<S, C>,
    key: KeyEvent,
) -> Result<EventResult> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.cursor_down(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let Some((group, id)) = state.current_checkbox() else {
                return Ok(EventResult::Ignored);
            };
            panel.toggle(group, id)?;
        }
        _ => return Ok(EventResult::Ignored),
    }
    Ok(EventResult::Continue)
}

/// Wait up to `timeout` for an event and handle it
///
/// # Errors
///
/// Returns an error if event polling fails or the panel rejects an operation.
pub fn poll_and_handle<S: QueryStore, C: Clock>(
    state: &mut BrowseState,
    panel: &mut FilterPanel<S, C>,
    timeout: Duration,
) -> crate::ui::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, panel, key)?,
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use crate::testing::sample_catalog;
    use crate::query::{FilterKey, SortOrder};
    use crate::store::MemoryRouter;
    use crate::sync::ManualClock;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn setup(router: &MemoryRouter) -> (BrowseState, FilterPanel<&MemoryRouter, ManualClock>) {
        let catalog = sample_catalog();
        let state = BrowseState::new(
            catalog.fetch_brands().unwrap(),
            catalog.fetch_categories().unwrap(),
        );
        let panel = FilterPanel::builder()
            .store(router)
            .clock(ManualClock::new())
            .build()
            .unwrap();
        (state, panel)
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let router = MemoryRouter::new("search=pu");
        let (mut state, mut panel) = setup(&router);

        handle_key(&mut state, &mut panel, press(KeyCode::Char('m'))).unwrap();
        handle_key(&mut state, &mut panel, press(KeyCode::Char('p'))).unwrap();
        assert_eq!(panel.display_value(FilterKey::Search), Some("pump"));

        handle_key(&mut state, &mut panel, press(KeyCode::Backspace)).unwrap();
        assert_eq!(panel.display_value(FilterKey::Search), Some("pum"));
        assert!(panel.is_editing(FilterKey::Search));
        assert_eq!(router.call_count(), 0);
    }

    #[test]
    fn test_backspace_on_empty_field_is_ignored() {
        let router = MemoryRouter::new("");
        let (mut state, mut panel) = setup(&router);
        let result = handle_key(&mut state, &mut panel, press(KeyCode::Backspace)).unwrap();
        assert_eq!(result, EventResult::Ignored);
        assert!(!panel.has_pending());
    }

    #[test]
    fn test_space_toggles_checkbox() {
        let router = MemoryRouter::new("page=2");
        let (mut state, mut panel) = setup(&router);
        state.focus = Focus::Brands;

        handle_key(&mut state, &mut panel, press(KeyCode::Down)).unwrap();
        handle_key(&mut state, &mut panel, press(KeyCode::Char(' '))).unwrap();

        assert_eq!(router.last_call().unwrap().href, "?brandId=b2&page=1");
    }

    #[test]
    fn test_global_shortcuts() {
        let router = MemoryRouter::new("search=pump");
        let (mut state, mut panel) = setup(&router);

        handle_key(&mut state, &mut panel, ctrl('s')).unwrap();
        assert_eq!(panel.sort(), SortOrder::CreatedDesc.next());

        handle_key(&mut state, &mut panel, ctrl('x')).unwrap();
        assert_eq!(router.last_call().unwrap().href, "?page=1");

        let back = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(handle_key(&mut state, &mut panel, back).unwrap(), EventResult::Back);
        assert_eq!(
            handle_key(&mut state, &mut panel, press(KeyCode::Esc)).unwrap(),
            EventResult::Quit
        );
    }

    #[test]
    fn test_help_swallows_next_key() {
        let router = MemoryRouter::new("");
        let (mut state, mut panel) = setup(&router);

        handle_key(&mut state, &mut panel, press(KeyCode::F(1))).unwrap();
        assert!(state.show_help);
        handle_key(&mut state, &mut panel, press(KeyCode::Esc)).unwrap();
        assert!(!state.show_help);
    }

    #[test]
    fn test_tab_moves_focus() {
        let router = MemoryRouter::new("");
        let (mut state, mut panel) = setup(&router);
        handle_key(&mut state, &mut panel, press(KeyCode::Tab)).unwrap();
        assert_eq!(state.focus, Focus::Field(FilterKey::MinPrice));
        handle_key(&mut state, &mut panel, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)).unwrap();
        assert_eq!(state.focus, Focus::Field(FilterKey::Search));
    }
}
