//! Filter panel: every catalog control bound to one query store
//!
//! `FilterPanel` owns one [`FieldSynchronizer`] per text field and one
//! [`ToggleSetSynchronizer`] per checkbox group, plus the sort and pagination
//! controls. It is the only writer to the store, and it is driven by a
//! single-threaded event loop:
//!
//! ```text
//! key/click ──▶ on_input_change / toggle / set_sort / go_to_page / clear_filters
//! loop tick ──▶ tick(): deliver store changes to idle fields, fire due timers
//! teardown  ──▶ dispose() (also on drop): pending writes are discarded
//! ```
//!
//! Every write starts from [`latest_snapshot`](FilterPanel::latest_snapshot),
//! which is the store's current snapshot, or the target of the navigations
//! this panel issued that the store has not reflected yet. Two writes in the
//! same tick therefore build on each other instead of racing.

use super::clock::{Clock, SystemClock};
use super::error::{Result, SyncError};
use super::field::{FieldSynchronizer, Reconcile};
use super::notice::Notice;
use super::toggle::ToggleSetSynchronizer;
use crate::config::{NavigationErrorPolicy, SyncSettings};
use crate::query::{FilterKey, QueryError, QuerySnapshot, SortOrder, list};
use crate::store::{NavigateOptions, NavigationError, QueryStore};
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// What triggered a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitCause {
    /// A debounced text field
    Field(FilterKey),
    /// Several text fields merged into one write
    Fields,
    /// A checkbox in a multi-select group
    Toggle(FilterKey),
    /// The sort control
    Sort,
    /// The pagination control
    Page,
    /// The clear-filters action
    Clear,
}

impl fmt::Display for CommitCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(key) => write!(f, "{key} field"),
            Self::Fields => f.write_str("text fields"),
            Self::Toggle(key) => write!(f, "{key} toggle"),
            Self::Sort => f.write_str("sort"),
            Self::Page => f.write_str("page"),
            Self::Clear => f.write_str("clear filters"),
        }
    }
}

/// What happened during one [`tick`](FilterPanel::tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The store showed a new snapshot since the last tick
    pub snapshot_changed: bool,
    /// Idle fields whose value was replaced from the store
    pub reconciled: usize,
    /// Navigations issued by due timers
    pub navigations: usize,
}

/// Render model for one text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Query key
    pub key: FilterKey,
    /// Text to show in the input
    pub value: String,
    /// Whether the user has uncommitted input
    pub is_editing: bool,
}

/// Render model for the whole panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// Text fields in canonical key order
    pub fields: Vec<FieldView>,
    /// Checked brand ids
    pub brand_ids: Vec<String>,
    /// Checked category ids
    pub category_ids: Vec<String>,
    /// Effective sort order
    pub sort: SortOrder,
    /// Effective page
    pub page: u32,
    /// Number of active filter keys
    pub active_filters: usize,
    /// Query string the panel is building on
    pub href: String,
}

impl PanelView {
    /// View of one text field
    #[must_use]
    pub fn field(&self, key: FilterKey) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.key == key)
    }
}

/// Navigations issued but not yet reflected by the store
///
/// A target stops being outstanding once the store shows it (or a later
/// target), or once the store changes to something none of them explain.
/// Version bumps are not counted: a navigation to the URL already showing
/// never produces one.
#[derive(Debug, Clone, Default)]
struct InFlight {
    targets: VecDeque<QuerySnapshot>,
    checked_version: u64,
}

impl InFlight {
    /// Leading targets that are no longer outstanding
    fn settled(&self, current: &QuerySnapshot, version: u64) -> usize {
        if self.targets.is_empty() {
            return 0;
        }
        let current = current.to_href();
        match self.targets.iter().position(|target| target.to_href() == current) {
            Some(idx) => idx + 1,
            None if version != self.checked_version => self.targets.len(),
            None => 0,
        }
    }

    fn outstanding(&self, current: &QuerySnapshot, version: u64) -> Option<&QuerySnapshot> {
        self.targets.iter().skip(self.settled(current, version)).last()
    }

    fn prune(&mut self, current: &QuerySnapshot, version: u64) -> usize {
        let settled = self.settled(current, version);
        self.targets.drain(..settled);
        self.checked_version = version;
        settled
    }

    fn push(&mut self, target: QuerySnapshot) {
        self.targets.push_back(target);
    }
}

/// Every filter control of the catalog page, bound to one query store
pub struct FilterPanel<S: QueryStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    settings: SyncSettings,
    fields: Vec<FieldSynchronizer>,
    toggles: Vec<ToggleSetSynchronizer>,
    observed_version: u64,
    in_flight: InFlight,
    notices: Vec<Notice>,
    disposed: bool,
}

impl<S: QueryStore> FilterPanel<S, SystemClock> {
    /// Create a new builder for constructing a `FilterPanel`
    #[must_use]
    pub fn builder() -> FilterPanelBuilder<S, SystemClock> {
        FilterPanelBuilder::new()
    }
}

impl<S: QueryStore, C: Clock> FilterPanel<S, C> {
    /// Create a panel whose fields mirror the store's current snapshot
    pub fn new(store: S, clock: C, settings: SyncSettings) -> Self {
        let snapshot = store.current();
        let observed_version = store.version();
        let fields = FilterKey::TEXT_FIELDS
            .into_iter()
            .map(|key| FieldSynchronizer::new(key, &snapshot, settings.debounce()))
            .collect();
        let toggles = FilterKey::TOGGLE_SETS
            .into_iter()
            .map(ToggleSetSynchronizer::new)
            .collect();

        Self {
            store,
            clock,
            settings,
            fields,
            toggles,
            observed_version,
            in_flight: InFlight {
                targets: VecDeque::new(),
                checked_version: observed_version,
            },
            notices: Vec::new(),
            disposed: false,
        }
    }

    /// Get the store reference
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Get the clock reference
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Get the synchronizer settings
    #[must_use]
    pub const fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Text field bound to `key`
    #[must_use]
    pub fn field(&self, key: FilterKey) -> Option<&FieldSynchronizer> {
        self.fields.iter().find(|field| field.key() == key)
    }

    fn field_mut(&mut self, key: FilterKey) -> Result<&mut FieldSynchronizer> {
        self.fields
            .iter_mut()
            .find(|field| field.key() == key)
            .ok_or(SyncError::NotATextField(key))
    }

    fn toggle_mut(&mut self, key: FilterKey) -> Result<&mut ToggleSetSynchronizer> {
        self.toggles
            .iter_mut()
            .find(|toggle| toggle.key() == key)
            .ok_or(SyncError::NotAToggleSet(key))
    }

    const fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            Err(SyncError::Disposed)
        } else {
            Ok(())
        }
    }

    /// The snapshot new writes build on
    ///
    /// This is the target of this panel's latest navigation while the store
    /// has not caught up with it, and the store's snapshot otherwise.
    #[must_use]
    pub fn latest_snapshot(&self) -> QuerySnapshot {
        let current = self.store.current();
        self.in_flight
            .outstanding(&current, self.store.version())
            .cloned()
            .unwrap_or(current)
    }

    /// Record a keystroke in a text field
    ///
    /// # Errors
    ///
    /// Returns `SyncError::NotATextField` if `key` is not `search`,
    /// `minPrice` or `maxPrice`, or `SyncError::Disposed` after `dispose`.
    pub fn on_input_change(&mut self, key: FilterKey, text: impl Into<String>) -> Result<()> {
        self.ensure_live()?;
        let now = self.clock.now();
        self.field_mut(key)?.on_input_change(text, now);
        Ok(())
    }

    /// Text to render in a field (`None` for keys that are not text fields)
    #[must_use]
    pub fn display_value(&self, key: FilterKey) -> Option<&str> {
        self.field(key).map(FieldSynchronizer::display_value)
    }

    /// Whether the user has uncommitted input in `key`
    #[must_use]
    pub fn is_editing(&self, key: FilterKey) -> bool {
        self.field(key).is_some_and(FieldSynchronizer::is_editing)
    }

    /// Whether any text field is waiting for its debounce window
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.fields.iter().any(FieldSynchronizer::has_pending)
    }

    /// Earliest pending debounce deadline, for sizing the event loop wait
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.fields.iter().filter_map(FieldSynchronizer::deadline).min()
    }

    /// Flip `id` in a checkbox group and navigate immediately
    ///
    /// Returns whether a navigation was issued.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::NotAToggleSet` if `key` is not `brandId` or
    /// `categoryId`, `SyncError::InvalidId` if `id` is empty or contains a
    /// comma or whitespace, or `SyncError::Disposed` after `dispose`.
    pub fn toggle(&mut self, key: FilterKey, id: &str) -> Result<bool> {
        self.ensure_live()?;
        self.toggle_mut(key)?;
        if !list::is_valid_id(id) {
            return Err(SyncError::InvalidId {
                key,
                id: id.to_string(),
            });
        }
        let latest = self.latest_snapshot();
        let next = self.toggle_mut(key)?.toggle(id, &latest);
        Ok(self.commit(next, CommitCause::Toggle(key), false))
    }

    /// Whether `id` is checked in a checkbox group
    #[must_use]
    pub fn is_checked(&self, key: FilterKey, id: &str) -> bool {
        self.latest_snapshot().has_id(key, id)
    }

    /// Effective sort order
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.latest_snapshot().sort()
    }

    /// Effective page
    #[must_use]
    pub fn page(&self) -> u32 {
        self.latest_snapshot().page()
    }

    /// Number of filter keys set in the latest snapshot (sort and page excluded)
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.latest_snapshot().active_filter_count()
    }

    /// Change the sort order, going back to the first page
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Disposed` after `dispose`.
    pub fn set_sort(&mut self, order: SortOrder) -> Result<bool> {
        self.ensure_live()?;
        let next = self
            .latest_snapshot()
            .with_value(FilterKey::Sort, order.as_str())
            .with_first_page();
        Ok(self.commit(next, CommitCause::Sort, false))
    }

    /// Jump to a result page
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Query` for page 0, or `SyncError::Disposed` after `dispose`.
    pub fn go_to_page(&mut self, page: u32) -> Result<bool> {
        self.ensure_live()?;
        if page == 0 {
            return Err(QueryError::InvalidPage(page.to_string()).into());
        }
        let next = self
            .latest_snapshot()
            .with_value(FilterKey::Page, &page.to_string());
        Ok(self.commit(next, CommitCause::Page, false))
    }

    /// Move to the next page unless already on `total_pages`
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Disposed` after `dispose`.
    pub fn next_page(&mut self, total_pages: u32) -> Result<bool> {
        let page = self.page();
        if page >= total_pages {
            return Ok(false);
        }
        self.go_to_page(page + 1)
    }

    /// Move to the previous page unless already on the first
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Disposed` after `dispose`.
    pub fn prev_page(&mut self) -> Result<bool> {
        let page = self.page();
        if page <= 1 {
            return Ok(false);
        }
        self.go_to_page(page - 1)
    }

    /// Drop every filter in one navigation
    ///
    /// Pending text edits are cancelled and their inputs emptied before the
    /// single navigation to `?page=1` is issued, even if the URL already
    /// looks like that.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Disposed` after `dispose`.
    pub fn clear_filters(&mut self) -> Result<bool> {
        self.ensure_live()?;
        for field in &mut self.fields {
            field.reset();
        }
        for toggle in &mut self.toggles {
            toggle.forget();
        }
        Ok(self.commit(QuerySnapshot::pagination_only(), CommitCause::Clear, true))
    }

    /// Run one event loop iteration
    ///
    /// Delivers a changed store snapshot to idle fields, then fires every
    /// debounce timer that is due.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Disposed` after `dispose`.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.ensure_live()?;
        let (snapshot_changed, reconciled) = self.observe_store();
        let navigations = self.flush_due(self.clock.now());
        Ok(TickOutcome {
            snapshot_changed,
            reconciled,
            navigations,
        })
    }

    fn observe_store(&mut self) -> (bool, usize) {
        let version = self.store.version();
        if version == self.observed_version {
            return (false, 0);
        }
        self.observed_version = version;

        let settled = self.in_flight.prune(&self.store.current(), version);
        if settled > 0 {
            trace!(version, settled, "issued navigations no longer outstanding");
        }

        let latest = self.latest_snapshot();
        let reconciled = self
            .fields
            .iter_mut()
            .map(|field| field.reconcile(&latest))
            .filter(|outcome| *outcome == Reconcile::Updated)
            .count();
        (true, reconciled)
    }

    fn flush_due(&mut self, now: Instant) -> usize {
        if self.settings.coalesce_commits {
            let mut merged = self.latest_snapshot();
            let mut keys = Vec::new();
            for field in &mut self.fields {
                if let Some(value) = field.fire(now) {
                    merged = merged.with_value(field.key(), &value);
                    keys.push(field.key());
                }
            }
            if keys.is_empty() {
                return 0;
            }
            debug!(?keys, "coalescing due fields");
            return usize::from(self.commit(merged.with_first_page(), CommitCause::Fields, false));
        }

        let mut navigations = 0;
        for idx in 0..self.fields.len() {
            if !self.fields[idx].is_due(now) {
                continue;
            }
            let latest = self.latest_snapshot();
            let key = self.fields[idx].key();
            if let Some(next) = self.fields[idx].commit(now, &latest)
                && self.commit(next, CommitCause::Field(key), false)
            {
                navigations += 1;
            }
        }
        navigations
    }

    fn commit(&mut self, next: QuerySnapshot, cause: CommitCause, force: bool) -> bool {
        if !force && next == self.latest_snapshot() {
            debug!(%cause, "commit skipped: query unchanged");
            return false;
        }

        let href = next.to_href();
        self.in_flight
            .prune(&self.store.current(), self.store.version());
        match self.store.navigate(&href, NavigateOptions::preserve_scroll()) {
            Ok(()) => {
                debug!(%cause, %href, "navigate");
                self.in_flight.push(next);
                true
            }
            Err(err) => {
                self.handle_navigation_error(cause, &err);
                false
            }
        }
    }

    fn handle_navigation_error(&mut self, cause: CommitCause, err: &NavigationError) {
        match self.settings.navigation_errors {
            NavigationErrorPolicy::Surface => {
                warn!(%cause, error = %err, "navigation failed");
                self.notices
                    .push(Notice::error(format!("Couldn't update filters: {err}")));
            }
            NavigationErrorPolicy::Drop => {
                debug!(%cause, error = %err, "navigation failed, dropped");
            }
        }

        // Nothing will land: idle fields go back to what the URL says.
        let latest = self.latest_snapshot();
        for field in &mut self.fields {
            field.reconcile(&latest);
        }
    }

    /// Take the notices raised since the last call
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Render model of every control
    #[must_use]
    pub fn view(&self) -> PanelView {
        let latest = self.latest_snapshot();
        let owned_ids =
            |key: FilterKey| latest.ids(key).into_iter().map(str::to_string).collect::<Vec<_>>();

        PanelView {
            fields: self
                .fields
                .iter()
                .map(|field| FieldView {
                    key: field.key(),
                    value: field.display_value().to_string(),
                    is_editing: field.is_editing(),
                })
                .collect(),
            brand_ids: owned_ids(FilterKey::BrandId),
            category_ids: owned_ids(FilterKey::CategoryId),
            sort: latest.sort(),
            page: latest.page(),
            active_filters: latest.active_filter_count(),
            href: latest.to_href(),
        }
    }

    /// Whether [`dispose`](Self::dispose) has run
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Cancel every pending write; the panel rejects further operations
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for field in &mut self.fields {
            field.dispose();
        }
        self.disposed = true;
        debug!("filter panel disposed");
    }
}

impl<S: QueryStore, C: Clock> Drop for FilterPanel<S, C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Builder for `FilterPanel`
///
/// ```
/// use catalog_filters::store::MemoryRouter;
/// use catalog_filters::sync::{FilterPanel, ManualClock};
///
/// let router = MemoryRouter::new("?search=pump");
/// let panel = FilterPanel::builder()
///     .store(&router)
///     .clock(ManualClock::new())
///     .debounce_ms(300)
///     .build()
///     .unwrap();
/// assert_eq!(panel.display_value(catalog_filters::query::FilterKey::Search), Some("pump"));
/// ```
pub struct FilterPanelBuilder<S, C> {
    store: Option<S>,
    clock: C,
    settings: SyncSettings,
}

impl<S: QueryStore> FilterPanelBuilder<S, SystemClock> {
    /// Create a builder with the system clock and default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            clock: SystemClock,
            settings: SyncSettings::default(),
        }
    }
}

impl<S: QueryStore> Default for FilterPanelBuilder<S, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: QueryStore, C: Clock> FilterPanelBuilder<S, C> {
    /// Set the query store (required)
    #[must_use]
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the clock
    #[must_use]
    pub fn clock<C2: Clock>(self, clock: C2) -> FilterPanelBuilder<S, C2> {
        FilterPanelBuilder {
            store: self.store,
            clock,
            settings: self.settings,
        }
    }

    /// Set all synchronizer settings
    #[must_use]
    pub fn settings(mut self, settings: SyncSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the debounce window
    #[must_use]
    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.settings.debounce_ms = ms;
        self
    }

    /// Build the `FilterPanel`
    ///
    /// # Errors
    ///
    /// Returns `SyncError::BuildError` if no store was provided.
    pub fn build(self) -> Result<FilterPanel<S, C>> {
        let store = self
            .store
            .ok_or_else(|| SyncError::BuildError("Query store is required".to_string()))?;
        Ok(FilterPanel::new(store, self.clock, self.settings))
    }
}
