//! Command implementations
//!
//! Each command is a module with an `execute` function that takes parsed CLI
//! args and writes its result through an [`OutputWriter`](crate::ui::OutputWriter).

pub mod browse;
pub mod config;
pub mod parse;
pub mod products;
pub mod replay;

pub use browse::execute as browse;
pub use config::execute as config;
pub use parse::execute as parse;
pub use products::execute as products;
pub use replay::execute as replay;
