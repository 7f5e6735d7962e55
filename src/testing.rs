//! Testing utilities for catalog-filters
//!
//! Fixtures that wire a [`FilterPanel`] to a [`MemoryRouter`] and a
//! [`ManualClock`] so tests can type, advance time and inspect navigations
//! without any real waiting.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::MemoryCatalog;
use crate::config::SyncSettings;
use crate::store::{MemoryRouter, QueryStore};
use crate::sync::{FilterPanel, ManualClock};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A panel, its router and a handle on its clock
///
/// # Examples
/// ```ignore
/// let mut test = TestPanel::new("search=pump&page=3");
/// test.panel.on_input_change(FilterKey::Search, "").unwrap();
/// test.advance_ms(500);
/// assert_eq!(test.hrefs(), vec!["?page=1"]);
/// ```
pub struct TestPanel {
    pub router: Rc<MemoryRouter>,
    pub clock: ManualClock,
    pub panel: FilterPanel<Rc<MemoryRouter>, ManualClock>,
}

impl TestPanel {
    /// Panel with default settings over a router showing `initial`
    ///
    /// # Panics
    /// Panics if the panel cannot be built.
    pub fn new(initial: &str) -> Self {
        Self::with_settings(initial, SyncSettings::default())
    }

    /// Panel with custom settings
    ///
    /// # Panics
    /// Panics if the panel cannot be built.
    pub fn with_settings(initial: &str, settings: SyncSettings) -> Self {
        let router = Rc::new(MemoryRouter::new(initial));
        let clock = ManualClock::new();
        let panel = FilterPanel::builder()
            .store(Rc::clone(&router))
            .clock(clock.clone())
            .settings(settings)
            .build()
            .expect("Failed to build test panel");
        Self {
            router,
            clock,
            panel,
        }
    }

    /// Move the clock forward and tick once
    ///
    /// # Panics
    /// Panics if the panel has been disposed.
    pub fn advance_ms(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
        self.panel.tick().expect("tick failed");
    }

    /// Land queued navigations and tick so the panel observes them
    ///
    /// # Panics
    /// Panics if the panel has been disposed.
    pub fn settle(&mut self) {
        self.router.settle();
        self.panel.tick().expect("tick failed");
    }

    /// Every href passed to `navigate`, oldest first
    #[must_use]
    pub fn hrefs(&self) -> Vec<String> {
        self.router.calls().into_iter().map(|call| call.href).collect()
    }

    /// Query string the router is showing
    #[must_use]
    pub fn current_href(&self) -> String {
        self.router.current().to_href()
    }
}

/// The built-in sample catalog with 12 products per page
///
/// # Panics
/// Panics if the bundled sample data is invalid.
#[must_use]
pub fn sample_catalog() -> MemoryCatalog {
    MemoryCatalog::sample(12).expect("bundled sample catalog is valid")
}

/// A file that is removed when dropped
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Write `content` to a fresh file under the system temp directory
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn create(name: &str, content: &str) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!(
            "catalog-filters-{}-{name}",
            std::process::id()
        ));
        fs::write(&path, content)?;
        Ok(Self { path })
    }

    /// Path of the file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterKey;

    #[test]
    fn test_panel_fixture_drives_time() {
        let mut test = TestPanel::new("search=pump&page=3");
        test.panel.on_input_change(FilterKey::Search, "").unwrap();

        test.advance_ms(499);
        assert!(test.hrefs().is_empty());

        test.advance_ms(1);
        assert_eq!(test.hrefs(), vec!["?page=1"]);

        test.settle();
        assert_eq!(test.current_href(), "?page=1");
    }

    #[test]
    fn test_temp_file_auto_cleanup() {
        let path = {
            let file = TempFile::create("cleanup.txt", "x").unwrap();
            assert!(file.path().exists());
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_sample_catalog() {
        assert_eq!(sample_catalog().product_count(), 28);
    }
}
