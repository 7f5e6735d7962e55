//! Synchronization between filter controls and the URL query
//!
//! The URL is the only durable filter state. Text fields buffer keystrokes
//! locally and write after a quiet period; checkboxes, sort and pagination
//! write immediately. Every write is computed from the latest snapshot so
//! edits to different keys never overwrite each other.
//!
//! Time is injected through [`Clock`], so the whole core can be driven from
//! tests with a [`ManualClock`].

pub mod clock;
pub mod debounce;
pub mod error;
pub mod field;
pub mod notice;
pub mod panel;
pub mod toggle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{Debouncer, TimerHandle};
pub use error::{Result, SyncError};
pub use field::{EditSession, FieldSynchronizer, Reconcile};
pub use notice::{Notice, NoticeLevel};
pub use panel::{CommitCause, FieldView, FilterPanel, FilterPanelBuilder, PanelView, TickOutcome};
pub use toggle::ToggleSetSynchronizer;
