//! The catalog query string
//!
//! The URL query string is the single source of truth for catalog filters.
//! This module models it as immutable [`QuerySnapshot`]s keyed by
//! [`FilterKey`], and owns the wire format:
//!
//! - `search`: free text
//! - `minPrice`, `maxPrice`: decimal strings
//! - `brandId`, `categoryId`: comma-separated ids, no duplicates
//! - `sort`: one of [`SortOrder`], default `created_desc`
//! - `page`: 1-based, default `1`
//!
//! An absent key and a key with an empty value read the same, but writers
//! always delete rather than write an empty value.

pub mod codec;
pub mod error;
pub mod key;
pub mod list;
pub mod snapshot;

pub use error::QueryError;
pub use key::{FIRST_PAGE, FilterKey, SortOrder, parse_page};
pub use snapshot::QuerySnapshot;
