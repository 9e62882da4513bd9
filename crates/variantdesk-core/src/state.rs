//! Display-side application state.
//!
//! `AppState` is owned by the view loop. Fetch workers never touch it
//! directly; they hand back [`FetchEvent`]s and a final result which the
//! view applies on its own turn.

use std::collections::HashSet;

use crate::records::{Column, Record};
use crate::store::{sort_records, RecordStore, SearchField, SharedStore, SortState};

/// Fetch lifecycle. `Success`, `NetworkError`, `ParseError` and
/// `EmptyResult` are transient: the state returns to `Idle` once the
/// result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Fetching,
    Success,
    NetworkError,
    ParseError,
    EmptyResult,
}

/// Progress notifications emitted by a running fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FetchEvent {
    Phase(FetchPhase),
    /// Fraction in `0.0..=1.0`; non-decreasing until the final reset to 0.
    Progress(f32),
}

#[derive(Debug)]
pub struct AppState {
    store: SharedStore,
    search_field: SearchField,
    query: String,
    sort: Option<SortState>,
    status: String,
    progress: f32,
    phase: FetchPhase,
    seen_urls: HashSet<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RecordStore::new().shared())
    }
}

impl AppState {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            search_field: SearchField::default(),
            query: String::new(),
            sort: None,
            status: "Ready.".to_string(),
            progress: 0.0,
            phase: FetchPhase::Idle,
            seen_urls: HashSet::new(),
        }
    }

    /// Handle passed to fetch workers.
    #[must_use]
    pub fn store(&self) -> SharedStore {
        SharedStore::clone(&self.store)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        RecordStore::lock(&self.store).len()
    }

    /// Snapshot of every record in store order, for export.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Record> {
        RecordStore::lock(&self.store).records().to_vec()
    }

    /// Rows to display: the current search applied to the store, then the
    /// active sort. The store itself is never reordered.
    #[must_use]
    pub fn view(&self) -> Vec<Record> {
        let guard = RecordStore::lock(&self.store);
        let mut rows: Vec<Record> = guard
            .filter(self.search_field, &self.query)
            .into_iter()
            .cloned()
            .collect();
        drop(guard);

        if let Some(sort) = self.sort {
            sort_records(&mut rows, sort.column, sort.descending);
        }
        rows
    }

    pub fn set_search(&mut self, field: SearchField, query: &str) {
        self.search_field = field;
        self.query = query.trim().to_string();
    }

    #[must_use]
    pub fn search(&self) -> (SearchField, &str) {
        (self.search_field, &self.query)
    }

    /// Header click: sorts by `column`, flipping direction on repeat clicks.
    pub fn toggle_sort(&mut self, column: Column) -> SortState {
        let next = SortState::toggle(self.sort, column);
        self.sort = Some(next);
        next
    }

    /// Replaces the active sort; `None` shows rows in store order.
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    #[must_use]
    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    #[must_use]
    pub fn has_seen(&self, url: &str) -> bool {
        self.seen_urls.contains(url)
    }

    pub fn apply_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Phase(phase) => {
                self.phase = phase;
                if phase == FetchPhase::Fetching {
                    self.status = "Fetching...".to_string();
                }
            }
            FetchEvent::Progress(value) => {
                self.progress = if value.is_finite() {
                    value.clamp(0.0, 1.0)
                } else {
                    0.0
                };
            }
        }
    }

    /// Applies the final outcome of one fetch in a single step and returns
    /// to `Idle` with progress reset.
    pub fn finish_fetch(&mut self, url: &str, phase: FetchPhase, status: impl Into<String>) {
        if phase == FetchPhase::Success {
            self.seen_urls.insert(url.to_string());
        }
        self.status = status.into();
        self.progress = 0.0;
        self.phase = FetchPhase::Idle;
    }

    /// Empties the store and forgets processed URLs.
    pub fn clear(&mut self) {
        RecordStore::lock(&self.store).clear();
        self.seen_urls.clear();
        self.status = "Cleared.".to_string();
        self.progress = 0.0;
    }
}
