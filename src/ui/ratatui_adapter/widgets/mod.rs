//! Ratatui widgets for the browse screen

mod checkbox_list;
mod field_input;
mod help_bar;
mod help_overlay;
mod product_list;
mod query_bar;
mod status_bar;

pub use checkbox_list::{CheckboxItem, CheckboxList};
pub use field_input::FieldInput;
pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use product_list::ProductList;
pub use query_bar::QueryBar;
pub use status_bar::StatusBar;
