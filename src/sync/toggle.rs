//! Multi-select binding for id lists (`brandId`, `categoryId`)
//!
//! Checkbox toggles are discrete, so they commit immediately and keep no
//! local buffer: checked state is always read from the latest snapshot.

use crate::query::{FilterKey, QuerySnapshot, list};
use tracing::debug;

/// Where an id sat before it was unchecked
#[derive(Debug, Clone, PartialEq, Eq)]
struct RemovedId {
    id: String,
    index: usize,
    remaining: String,
}

/// Immediate-commit binding between a checkbox group and one list key
#[derive(Debug, Clone)]
pub struct ToggleSetSynchronizer {
    key: FilterKey,
    last_removed: Option<RemovedId>,
}

impl ToggleSetSynchronizer {
    /// Create a synchronizer for a list-valued key
    #[must_use]
    pub const fn new(key: FilterKey) -> Self {
        Self {
            key,
            last_removed: None,
        }
    }

    /// Query key this group writes
    #[must_use]
    pub const fn key(&self) -> FilterKey {
        self.key
    }

    /// Whether `id` is checked in `snapshot`
    #[must_use]
    pub fn is_checked(&self, snapshot: &QuerySnapshot, id: &str) -> bool {
        snapshot.has_id(self.key, id)
    }

    /// Checked ids in `snapshot`, in URL order
    #[must_use]
    pub fn selected<'a>(&self, snapshot: &'a QuerySnapshot) -> Vec<&'a str> {
        snapshot.ids(self.key)
    }

    /// Flip `id` on top of `latest` and reset the page
    ///
    /// New ids are appended. Unchecking an id and checking it again with no
    /// other change in between puts it back where it was, so a double toggle
    /// restores both membership and order.
    pub fn toggle(&mut self, id: &str, latest: &QuerySnapshot) -> QuerySnapshot {
        let current = latest.get_or_empty(self.key);
        let next = match list::position_of(current, id) {
            Some(index) => {
                let remaining = list::toggle_id(current, id);
                self.last_removed = Some(RemovedId {
                    id: id.to_string(),
                    index,
                    remaining: remaining.clone(),
                });
                remaining
            }
            None => match self.last_removed.take() {
                Some(removed) if removed.id == id && removed.remaining == current => {
                    list::insert_id_at(current, id, removed.index)
                }
                _ => list::toggle_id(current, id),
            },
        };
        debug!(key = %self.key, id, value = %next, "toggle committing");
        latest.with_value(self.key, &next).with_first_page()
    }

    /// Forget remembered positions (after the list was replaced wholesale)
    pub fn forget(&mut self) {
        self.last_removed = None;
    }
}
