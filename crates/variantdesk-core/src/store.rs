//! In-memory Record Store: keep-first merge by product id, search, and
//! display-only sort.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::records::{Column, ProductId, Record};

/// Store handle shared between the display loop and fetch workers.
///
/// Every merge takes the lock once, so overlapping fetches never interleave
/// their read-modify-write.
pub type SharedStore = Arc<Mutex<RecordStore>>;

/// Ordered table of records, at most one per non-null `product_id`.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `records`, dropping later duplicates.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records: merge(Vec::new(), records),
        }
    }

    #[must_use]
    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Locks a shared store, recovering the data if a previous holder panicked.
    pub fn lock(store: &SharedStore) -> MutexGuard<'_, RecordStore> {
        store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Appends `incoming` behind the existing rows and applies the
    /// keep-first rule. Returns how many incoming records were kept.
    pub fn merge(&mut self, incoming: Vec<Record>) -> usize {
        let before = self.records.len();
        let existing = std::mem::take(&mut self.records);
        self.records = merge(existing, incoming);
        self.records.len() - before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Case-insensitive substring search; see [`filter`].
    #[must_use]
    pub fn filter(&self, field: SearchField, query: &str) -> Vec<&Record> {
        filter(&self.records, field, query)
    }
}

/// Concatenates `existing` then `incoming` and drops every record whose
/// `product_id` was already seen earlier in that order.
///
/// Records without a `product_id` are always retained.
#[must_use]
pub fn merge(existing: Vec<Record>, incoming: Vec<Record>) -> Vec<Record> {
    let mut seen: HashSet<ProductId> = HashSet::with_capacity(existing.len() + incoming.len());
    existing
        .into_iter()
        .chain(incoming)
        .filter(|record| match &record.product_id {
            Some(id) => seen.insert(id.clone()),
            None => true,
        })
        .collect()
}

/// Fields offered by the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Name,
    ProductId,
    Barcode,
}

impl SearchField {
    /// Parses a field name; anything unrecognised searches by name.
    #[must_use]
    pub fn parse_or_name(raw: &str) -> Self {
        match raw.trim().to_lowercase().replace('-', "_").as_str() {
            "product_id" | "productid" | "id" => SearchField::ProductId,
            "barcode" => SearchField::Barcode,
            _ => SearchField::Name,
        }
    }

    #[must_use]
    pub fn column(self) -> Column {
        match self {
            SearchField::Name => Column::Name,
            SearchField::ProductId => Column::ProductId,
            SearchField::Barcode => Column::Barcode,
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column().header())
    }
}

/// Returns the records whose `field` contains `query`, ignoring case.
///
/// The query is trimmed first; an empty query returns every record in
/// order. Records with an absent or empty field never match a non-empty
/// query.
#[must_use]
pub fn filter<'a>(records: &'a [Record], field: SearchField, query: &str) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }

    let column = field.column();
    records
        .iter()
        .filter(|record| {
            let value = record.cell(column);
            !value.is_empty() && value.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Column and direction of the active grid sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub descending: bool,
}

impl SortState {
    #[must_use]
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    /// Next state after a header click on `column`: the same column flips
    /// direction, a different column starts ascending.
    #[must_use]
    pub fn toggle(current: Option<SortState>, column: Column) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column,
                descending: !state.descending,
            },
            _ => SortState::ascending(column),
        }
    }
}

#[derive(Debug, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// `,` is accepted as a decimal separator.
    fn of(value: String) -> Self {
        match value.trim().replace(',', ".").parse::<f64>() {
            Ok(n) => SortKey::Number(n),
            Err(_) => SortKey::Text(value),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        }
    }
}

/// Stable sort of `rows` by `column`.
///
/// Values that parse as decimals compare numerically and sort before
/// values that do not; the rest compare as strings. Ties keep their prior
/// relative order in both directions.
pub fn sort_records<R: Borrow<Record>>(rows: &mut [R], column: Column, descending: bool) {
    let mut keyed: Vec<(SortKey, usize)> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| (SortKey::of(row.borrow().cell(column)), idx))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });

    let order: Vec<usize> = keyed.into_iter().map(|(_, idx)| idx).collect();
    apply_permutation(rows, &order);
}

/// Reorders `rows` so that position `i` holds the element previously at
/// `order[i]`.
fn apply_permutation<T>(rows: &mut [T], order: &[usize]) {
    let mut placed = vec![false; rows.len()];
    for start in 0..rows.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let source = order[current];
            if source == start {
                break;
            }
            rows.swap(current, source);
            current = source;
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
