//! In-memory router with browser-like history
//!
//! `MemoryRouter` stands in for the browser's navigation layer. Navigations
//! are queued and only become visible when the owner calls
//! [`settle`](MemoryRouter::settle), mimicking a router that needs one or more
//! render cycles to reflect a new URL. It keeps a back/forward history and can
//! be told to reject upcoming navigations.

use super::error::{NavigationError, Result};
use super::traits::{NavigateOptions, QueryStore};
use crate::query::QuerySnapshot;
use std::cell::RefCell;
use std::collections::VecDeque;

/// When queued navigations become visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Landing {
    /// Navigations wait in a queue until `settle` is called
    #[default]
    Deferred,
    /// Navigations land inside the `navigate` call
    Immediate,
}

/// One recorded `navigate` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    /// The requested query string
    pub href: String,
    /// Options passed with the request
    pub options: NavigateOptions,
    /// Whether the router accepted the request
    pub accepted: bool,
}

#[derive(Debug)]
struct RouterState {
    history: Vec<QuerySnapshot>,
    cursor: usize,
    pending: VecDeque<QuerySnapshot>,
    version: u64,
    calls: Vec<NavigationRecord>,
    reject_next: usize,
}

impl RouterState {
    fn push_entry(&mut self, snapshot: QuerySnapshot) {
        self.history.truncate(self.cursor + 1);
        self.history.push(snapshot);
        self.cursor = self.history.len() - 1;
        self.version += 1;
    }
}

/// Single-threaded router backed by an in-memory history stack
#[derive(Debug)]
pub struct MemoryRouter {
    state: RefCell<RouterState>,
    landing: Landing,
}

impl MemoryRouter {
    /// Create a router showing `initial` (a query string, `?` optional)
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            state: RefCell::new(RouterState {
                history: vec![QuerySnapshot::parse(initial)],
                cursor: 0,
                pending: VecDeque::new(),
                version: 0,
                calls: Vec::new(),
                reject_next: 0,
            }),
            landing: Landing::Deferred,
        }
    }

    /// Set when navigations become visible
    #[must_use]
    pub const fn with_landing(mut self, landing: Landing) -> Self {
        self.landing = landing;
        self
    }

    /// Land every queued navigation, returning how many landed
    pub fn settle(&self) -> usize {
        let mut landed = 0;
        while self.settle_one() {
            landed += 1;
        }
        landed
    }

    /// Land the oldest queued navigation
    pub fn settle_one(&self) -> bool {
        let mut state = self.state.borrow_mut();
        match state.pending.pop_front() {
            Some(snapshot) => {
                state.push_entry(snapshot);
                true
            }
            None => false,
        }
    }

    /// Go back one history entry, as the browser back button does
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.cursor == 0 {
            return false;
        }
        state.cursor -= 1;
        state.version += 1;
        true
    }

    /// Go forward one history entry
    pub fn forward(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.cursor + 1 >= state.history.len() {
            return false;
        }
        state.cursor += 1;
        state.version += 1;
        true
    }

    /// Replace the URL from outside the filter core (edited address bar, link)
    pub fn visit(&self, query: &str) {
        self.state
            .borrow_mut()
            .push_entry(QuerySnapshot::parse(query));
    }

    /// Reject the next `count` navigation requests
    pub fn reject_next(&self, count: usize) {
        self.state.borrow_mut().reject_next = count;
    }

    /// Every `navigate` call received so far
    #[must_use]
    pub fn calls(&self) -> Vec<NavigationRecord> {
        self.state.borrow().calls.clone()
    }

    /// Number of `navigate` calls received so far (accepted or not)
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    /// The most recent `navigate` call
    #[must_use]
    pub fn last_call(&self) -> Option<NavigationRecord> {
        self.state.borrow().calls.last().cloned()
    }

    /// Forget recorded calls (history is kept)
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Navigations requested but not yet visible
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Number of history entries
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.state.borrow().history.len()
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("")
    }
}

impl QueryStore for MemoryRouter {
    fn current(&self) -> QuerySnapshot {
        let state = self.state.borrow();
        state.history[state.cursor].clone()
    }

    fn version(&self) -> u64 {
        self.state.borrow().version
    }

    fn navigate(&self, href: &str, options: NavigateOptions) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.reject_next > 0 {
            state.reject_next -= 1;
            state.calls.push(NavigationRecord {
                href: href.to_string(),
                options,
                accepted: false,
            });
            return Err(NavigationError::Rejected {
                href: href.to_string(),
                reason: "router rejected the request".to_string(),
            });
        }

        state.calls.push(NavigationRecord {
            href: href.to_string(),
            options,
            accepted: true,
        });
        let snapshot = QuerySnapshot::parse(href);
        match self.landing {
            Landing::Deferred => state.pending.push_back(snapshot),
            Landing::Immediate => state.push_entry(snapshot),
        }
        Ok(())
    }
}
