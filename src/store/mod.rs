//! Query-param store: the navigation layer behind the URL
//!
//! The filter core never touches ambient browser state. It reads the URL
//! through [`QueryStore::current`] and writes through a single
//! [`QueryStore::navigate`] entry point, so any router (or the in-memory
//! [`MemoryRouter`] used by the TUI and the tests) can be injected.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::NavigationError;
pub use memory::{Landing, MemoryRouter, NavigationRecord};
pub use traits::{NavigateOptions, QueryStore};
