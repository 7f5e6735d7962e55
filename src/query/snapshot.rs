//! Immutable point-in-time view of the catalog query string
//!
//! A [`QuerySnapshot`] is never mutated: every edit returns a new snapshot,
//! and clones share the underlying storage. Keys the catalog does not know
//! about are kept exactly as they arrived (every occurrence, in order, bare
//! flags included) so that edits never drop parameters that belong to someone
//! else, e.g. campaign tracking tags.

use super::codec;
use super::key::{FIRST_PAGE, FilterKey, SortOrder};
use super::list;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Immutable mapping of filter keys to values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySnapshot {
    values: Arc<BTreeMap<FilterKey, String>>,
    extras: Arc<Vec<(String, Option<String>)>>,
}

impl QuerySnapshot {
    /// An empty snapshot (no keys)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The minimal snapshot: first page only
    #[must_use]
    pub fn pagination_only() -> Self {
        Self::empty().with_first_page()
    }

    /// Parse a query string, with or without a leading `?`
    ///
    /// Parsing never fails. Empty values read as absent, the first occurrence
    /// of a repeated catalog key wins, and list values are normalized.
    /// Anything else (non-numeric prices, unknown sort orders) is kept
    /// verbatim. Unknown keys are kept as-is, repeats included.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut values = BTreeMap::new();
        let mut extras = Vec::new();

        for (name, value) in codec::parse_pairs(query) {
            match FilterKey::from_name(&name) {
                Some(key) => {
                    if values.contains_key(&key) {
                        continue;
                    }
                    let value = value.unwrap_or_default();
                    let value = if key.is_multi_valued() {
                        list::normalize(&value)
                    } else {
                        value
                    };
                    if !value.is_empty() {
                        values.insert(key, value);
                    }
                }
                None => extras.push((name, value)),
            }
        }

        Self {
            values: Arc::new(values),
            extras: Arc::new(extras),
        }
    }

    /// Raw value of a key, if present
    #[must_use]
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Value of a key, or the empty string when absent
    #[must_use]
    pub fn get_or_empty(&self, key: FilterKey) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Whether the key is present
    #[must_use]
    pub fn contains(&self, key: FilterKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Ids of a list-valued key, in order
    #[must_use]
    pub fn ids(&self, key: FilterKey) -> Vec<&str> {
        self.get(key).map(list::split_ids).unwrap_or_default()
    }

    /// Whether a list-valued key contains `id`
    #[must_use]
    pub fn has_id(&self, key: FilterKey, id: &str) -> bool {
        self.ids(key).contains(&id)
    }

    /// Pairs outside the catalog schema, in arrival order
    ///
    /// A bare flag (`?preview`) has no value.
    #[must_use]
    pub fn extras(&self) -> &[(String, Option<String>)] {
        &self.extras
    }

    /// Number of keys (catalog and extra)
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() + self.extras.len()
    }

    /// Whether the query string is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot with `key` set to `value`
    ///
    /// An empty value deletes the key instead of writing `key=`.
    #[must_use]
    pub fn with_value(&self, key: FilterKey, value: &str) -> Self {
        let value = if key.is_multi_valued() {
            list::normalize(value)
        } else {
            value.to_string()
        };
        if value.is_empty() {
            return self.without(key);
        }
        let mut values = (*self.values).clone();
        values.insert(key, value);
        Self {
            values: Arc::new(values),
            extras: Arc::clone(&self.extras),
        }
    }

    /// A snapshot with `key` removed
    #[must_use]
    pub fn without(&self, key: FilterKey) -> Self {
        if !self.contains(key) {
            return self.clone();
        }
        let mut values = (*self.values).clone();
        values.remove(&key);
        Self {
            values: Arc::new(values),
            extras: Arc::clone(&self.extras),
        }
    }

    /// A snapshot on the first page of results
    #[must_use]
    pub fn with_first_page(&self) -> Self {
        self.with_value(FilterKey::Page, FIRST_PAGE)
    }

    /// Sanitized page number (1 when absent or malformed)
    #[must_use]
    pub fn page(&self) -> u32 {
        self.get(FilterKey::Page)
            .and_then(|raw| super::key::parse_page(raw).ok())
            .unwrap_or(1)
    }

    /// Sanitized sort order (the default when absent or unknown)
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.get(FilterKey::Sort)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// Number of filter keys present (excludes `sort` and `page`)
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.values.keys().filter(|key| key.is_filter()).count()
    }

    /// Catalog keys and their values in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Encoded query string without the leading `?`
    #[must_use]
    pub fn to_query_string(&self) -> String {
        codec::serialize_pairs(
            self.values
                .iter()
                .map(|(key, value)| (key.as_str(), Some(value.as_str())))
                .chain(
                    self.extras
                        .iter()
                        .map(|(key, value)| (key.as_str(), value.as_deref())),
                ),
        )
    }

    /// Query string suitable for `navigate`: `?a=b`, or empty
    #[must_use]
    pub fn to_href(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("?{}", self.to_query_string())
        }
    }
}

impl fmt::Display for QuerySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_href())
    }
}

impl From<&str> for QuerySnapshot {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}
