//! Ratatui front end for the filter panel
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ /catalog?search=pump&page=1                  │  query bar
//! ├──────────────┬──────────────┬────────────────┤
//! │ Search       │ Min price    │ Max price      │  debounced fields
//! ├──────────────┼──────────────┼────────────────┤
//! │ Brands       │ Categories   │ Products       │  toggles + results
//! ├──────────────┴──────────────┴────────────────┤
//! │ Status                                       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The loop settles the router, ticks the panel, refetches results when the
//! URL changed, draws, then waits for input no longer than the next debounce
//! deadline.

mod app;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::{BrowseApp, Screen};
pub use events::{EventResult, handle_key, poll_and_handle};
pub use state::{BrowseState, Focus};
pub use theme::Theme;
