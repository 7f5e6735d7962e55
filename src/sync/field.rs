//! Debounced text field bound to one query key
//!
//! A `FieldSynchronizer` keeps an input responsive (the local value changes
//! on every keystroke) while the URL only changes once typing settles.
//!
//! ```text
//!            input                      timer fires
//!  Idle ──────────────▶ Editing ───────────────────────▶ Idle
//!   ▲  ◀── reconcile     │  ▲                            (navigate issued)
//!   │    (not editing)   └──┘ input: restart timer
//!   └─────── reset / dispose from any state
//! ```
//!
//! While editing, snapshot changes are ignored so the user's text never
//! reverts under their cursor.

use super::debounce::{Debouncer, TimerHandle};
use crate::query::{FilterKey, QuerySnapshot};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Ephemeral state of one field's edit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditSession {
    /// Text shown in the input
    pub local_value: String,
    /// Whether the user has uncommitted input
    pub is_editing: bool,
    /// Pending write, if any
    pub pending: Option<TimerHandle>,
}

/// Outcome of offering a new snapshot to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// The local value already matched
    Unchanged,
    /// The local value was replaced by the snapshot's value
    Updated,
    /// The snapshot differed but the user is mid-edit
    Suppressed,
}

/// Two-way binding between a text input and one scalar query key
#[derive(Debug, Clone)]
pub struct FieldSynchronizer {
    key: FilterKey,
    session: EditSession,
    timer: Debouncer,
    disposed: bool,
}

impl FieldSynchronizer {
    /// Create an idle field mirroring `snapshot`
    #[must_use]
    pub fn new(key: FilterKey, snapshot: &QuerySnapshot, delay: Duration) -> Self {
        Self {
            key,
            session: EditSession {
                local_value: snapshot.get_or_empty(key).to_string(),
                is_editing: false,
                pending: None,
            },
            timer: Debouncer::new(delay),
            disposed: false,
        }
    }

    /// Query key this field writes
    #[must_use]
    pub const fn key(&self) -> FilterKey {
        self.key
    }

    /// Value to render in the input
    #[must_use]
    pub fn display_value(&self) -> &str {
        &self.session.local_value
    }

    /// Current edit session
    #[must_use]
    pub const fn session(&self) -> &EditSession {
        &self.session
    }

    /// Whether the user has uncommitted input
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.session.is_editing
    }

    /// Whether a write is waiting for its debounce window
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.session.pending.is_some()
    }

    /// When the pending write is due
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Whether [`dispose`](Self::dispose) has been called
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Record a keystroke: update the local value and restart the timer
    pub fn on_input_change(&mut self, text: impl Into<String>, now: Instant) {
        if self.disposed {
            trace!(key = %self.key, "input ignored on disposed field");
            return;
        }
        self.session.local_value = text.into();
        self.session.is_editing = true;
        self.session.pending = Some(self.timer.arm(now));
        trace!(key = %self.key, value = %self.session.local_value, "debounce armed");
    }

    /// Whether the pending write is due at `now`
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        !self.disposed && self.timer.is_due(now)
    }

    /// Fire a due timer, returning the value to write and going back to Idle
    ///
    /// The field returns to Idle as soon as the write is handed out; it does
    /// not wait for the navigation to land.
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        if self.disposed {
            return None;
        }
        self.timer.fire(now)?;
        self.session.pending = None;
        self.session.is_editing = false;
        Some(self.session.local_value.clone())
    }

    /// Build the committed snapshot for `value` on top of `latest`
    ///
    /// The key is deleted when `value` is empty, and the page always resets.
    #[must_use]
    pub fn apply(key: FilterKey, value: &str, latest: &QuerySnapshot) -> QuerySnapshot {
        latest.with_value(key, value).with_first_page()
    }

    /// Fire a due timer and build the snapshot to navigate to
    ///
    /// `latest` must be read when this is called, not when the edit started,
    /// so concurrent edits to other keys are kept.
    pub fn commit(&mut self, now: Instant, latest: &QuerySnapshot) -> Option<QuerySnapshot> {
        let value = self.fire(now)?;
        debug!(key = %self.key, value = %value, "field committing");
        Some(Self::apply(self.key, &value, latest))
    }

    /// Offer a new snapshot; adopted only while not editing
    pub fn reconcile(&mut self, snapshot: &QuerySnapshot) -> Reconcile {
        let external = snapshot.get_or_empty(self.key);
        if external == self.session.local_value {
            return Reconcile::Unchanged;
        }
        if self.session.is_editing {
            trace!(key = %self.key, external = %external, "reconcile suppressed mid-edit");
            return Reconcile::Suppressed;
        }
        debug!(key = %self.key, from = %self.session.local_value, to = %external, "field reconciled");
        self.session.local_value = external.to_string();
        Reconcile::Updated
    }

    /// Cancel the pending write without touching the local value
    pub fn cancel_pending(&mut self) -> bool {
        self.session.pending = None;
        self.timer.cancel()
    }

    /// Abandon any edit: cancel the timer, stop editing, clear the input
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.session.is_editing = false;
        self.session.local_value.clear();
    }

    /// Cancel the pending write for good; later input is ignored
    pub fn dispose(&mut self) {
        if self.cancel_pending() {
            debug!(key = %self.key, "pending write discarded on dispose");
        }
        self.session.is_editing = false;
        self.disposed = true;
    }
}
