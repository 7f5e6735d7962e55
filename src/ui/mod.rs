//! Terminal front ends
//!
//! [`output`] is the line-oriented writer used by every command;
//! [`ratatui_adapter`] is the interactive browse screen. Both consume the
//! filter panel through its public API only.

mod error;

pub mod output;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StatusBarWriter, StdoutWriter};
pub use ratatui_adapter::BrowseApp;
