//! The navigation layer as seen by the filter core

use super::error::Result;
use crate::query::QuerySnapshot;
use std::rc::Rc;

/// Options passed along with every navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Whether the viewport may scroll to the top
    pub scroll: bool,
}

impl NavigateOptions {
    /// Keep the viewport where it is (required for filter edits)
    #[must_use]
    pub const fn preserve_scroll() -> Self {
        Self { scroll: false }
    }
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self::preserve_scroll()
    }
}

/// Authoritative, externally mutable key-value store backed by the URL
///
/// `navigate` is fire-and-forget: the new query string may only show up in
/// [`current`](Self::current) one or more cycles later. `version` increases
/// every time the visible snapshot changes, whatever the cause (our own
/// navigation landing, back/forward, an edited address bar), so callers can
/// detect changes without comparing snapshots.
pub trait QueryStore {
    /// The snapshot currently visible in the URL
    fn current(&self) -> QuerySnapshot;

    /// Monotonic counter bumped on every visible change
    fn version(&self) -> u64;

    /// Request a navigation to `href` (a full query string such as `?page=1`)
    ///
    /// # Errors
    ///
    /// Returns `NavigationError` if the router refuses the request outright.
    fn navigate(&self, href: &str, options: NavigateOptions) -> Result<()>;
}

impl<T: QueryStore + ?Sized> QueryStore for &T {
    fn current(&self) -> QuerySnapshot {
        (**self).current()
    }

    fn version(&self) -> u64 {
        (**self).version()
    }

    fn navigate(&self, href: &str, options: NavigateOptions) -> Result<()> {
        (**self).navigate(href, options)
    }
}

impl<T: QueryStore + ?Sized> QueryStore for Rc<T> {
    fn current(&self) -> QuerySnapshot {
        (**self).current()
    }

    fn version(&self) -> u64 {
        (**self).version()
    }

    fn navigate(&self, href: &str, options: NavigateOptions) -> Result<()> {
        (**self).navigate(href, options)
    }
}

impl<T: QueryStore + ?Sized> QueryStore for Box<T> {
    fn current(&self) -> QuerySnapshot {
        (**self).current()
    }

    fn version(&self) -> u64 {
        (**self).version()
    }

    fn navigate(&self, href: &str, options: NavigateOptions) -> Result<()> {
        (**self).navigate(href, options)
    }
}
