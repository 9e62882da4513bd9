use super::*;

fn record(id: Option<i64>, name: &str) -> Record {
    Record {
        group_id: "g1".to_owned(),
        product_id: id.map(ProductId::Int),
        name: Some(name.to_owned()),
        ..Record::default()
    }
}

fn priced(name: &str, price_text: &str) -> Record {
    Record {
        name: Some(name.to_owned()),
        price_text: Some(price_text.to_owned()),
        ..Record::default()
    }
}

fn names<R: Borrow<Record>>(rows: &[R]) -> Vec<String> {
    rows.iter()
        .map(|r| r.borrow().name.clone().unwrap_or_default())
        .collect()
}

// -----------------------------------------------------------------------
// merge
// -----------------------------------------------------------------------

#[test]
fn merge_keeps_first_seen_record_for_duplicate_id() {
    let merged = merge(vec![record(Some(7), "A")], vec![record(Some(7), "B")]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].name.as_deref(), Some("A"));
}

#[test]
fn merge_preserves_relative_order() {
    let merged = merge(
        vec![record(Some(1), "one"), record(Some(2), "two")],
        vec![record(Some(3), "three"), record(Some(1), "dup"), record(Some(4), "four")],
    );
    assert_eq!(names(&merged), vec!["one", "two", "three", "four"]);
}

#[test]
fn merge_never_drops_records_without_id() {
    let merged = merge(vec![record(None, "x")], vec![record(None, "y"), record(None, "x")]);
    assert_eq!(merged.len(), 3);
}

#[test]
fn merge_dedups_within_incoming_batch() {
    let merged = merge(Vec::new(), vec![record(Some(5), "first"), record(Some(5), "second")]);
    assert_eq!(names(&merged), vec!["first"]);
}

#[test]
fn merge_is_idempotent_for_refetch() {
    let first = vec![record(Some(1), "a"), record(Some(2), "b"), record(None, "c")];
    let refetch = vec![record(Some(1), "a2"), record(Some(2), "b2")];
    let merged = merge(first.clone(), refetch);
    assert_eq!(merged, first);
}

#[test]
fn merge_treats_int_and_text_ids_as_distinct() {
    let text = Record {
        product_id: Some(ProductId::from("7")),
        ..Record::default()
    };
    let merged = merge(vec![record(Some(7), "int")], vec![text]);
    assert_eq!(merged.len(), 2);
}

#[test]
fn store_merge_reports_added_count() {
    let mut store = RecordStore::new();
    assert_eq!(store.merge(vec![record(Some(1), "a"), record(Some(2), "b")]), 2);
    assert_eq!(store.merge(vec![record(Some(2), "b"), record(Some(3), "c")]), 1);
    assert_eq!(store.len(), 3);
}

#[test]
fn store_clear_empties_everything() {
    let mut store = RecordStore::from_records((0..10).map(|i| record(Some(i), "n")).collect());
    assert_eq!(store.len(), 10);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn shared_store_merges_from_several_threads() {
    let store = RecordStore::new().shared();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let batch = (0..50).map(|i| record(Some(i), &format!("t{t}"))).collect();
                RecordStore::lock(&store).merge(batch);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(RecordStore::lock(&store).len(), 50);
}

// -----------------------------------------------------------------------
// filter
// -----------------------------------------------------------------------

#[test]
fn filter_empty_query_returns_everything_in_order() {
    let rows = vec![record(Some(1), "b"), record(Some(2), "a")];
    let hits = filter(&rows, SearchField::Name, "   ");
    assert_eq!(names(&hits), vec!["b", "a"]);
}

#[test]
fn filter_is_case_insensitive_substring() {
    let rows = vec![
        record(Some(1), "Red Running Shoe"),
        record(Some(2), "Blue Sandal"),
        record(Some(3), "SHOE horn"),
    ];
    let hits = filter(&rows, SearchField::Name, " shoe ");
    assert_eq!(names(&hits), vec!["Red Running Shoe", "SHOE horn"]);
}

#[test]
fn filter_by_product_id_uses_string_form() {
    let rows = vec![record(Some(12_345), "a"), record(Some(999), "b")];
    let hits = filter(&rows, SearchField::ProductId, "234");
    assert_eq!(names(&hits), vec!["a"]);
}

#[test]
fn filter_absent_field_never_matches() {
    let rows = vec![record(None, "a")];
    assert!(filter(&rows, SearchField::ProductId, "a").is_empty());
    assert!(filter(&rows, SearchField::Barcode, "a").is_empty());
}

#[test]
fn filter_without_matches_leaves_store_untouched() {
    let store = RecordStore::from_records(vec![record(Some(1), "a"), record(Some(2), "b")]);
    assert!(store.filter(SearchField::Name, "zzz").is_empty());
    assert_eq!(store.len(), 2);
}

#[test]
fn search_field_unknown_falls_back_to_name() {
    assert_eq!(SearchField::parse_or_name("colour"), SearchField::Name);
    assert_eq!(SearchField::parse_or_name("ProductID"), SearchField::ProductId);
    assert_eq!(SearchField::parse_or_name("product-id"), SearchField::ProductId);
    assert_eq!(SearchField::parse_or_name("BARCODE"), SearchField::Barcode);
}

// -----------------------------------------------------------------------
// sort
// -----------------------------------------------------------------------

#[test]
fn sort_orders_numeric_strings_numerically() {
    let mut rows = vec![
        priced("mid", "199.90"),
        priced("low", "49.50"),
        priced("high", "1050"),
    ];
    sort_records(&mut rows, Column::PriceText, false);
    assert_eq!(names(&rows), vec!["low", "mid", "high"]);
}

#[test]
fn sort_descending_reverses_order() {
    let mut rows = vec![
        priced("mid", "199.90"),
        priced("low", "49.50"),
        priced("high", "1050"),
    ];
    sort_records(&mut rows, Column::PriceText, true);
    assert_eq!(names(&rows), vec!["high", "mid", "low"]);
}

#[test]
fn sort_accepts_comma_decimal_separator() {
    let mut rows = vec![priced("b", "2,5"), priced("a", "10"), priced("c", "2,25")];
    sort_records(&mut rows, Column::PriceText, false);
    assert_eq!(names(&rows), vec!["c", "b", "a"]);
}

#[test]
fn sort_is_stable_for_ties_in_both_directions() {
    let mut rows = vec![priced("first", "5"), priced("x", "1"), priced("second", "5")];
    sort_records(&mut rows, Column::PriceText, false);
    assert_eq!(names(&rows), vec!["x", "first", "second"]);

    let mut rows = vec![priced("first", "5"), priced("x", "1"), priced("second", "5")];
    sort_records(&mut rows, Column::PriceText, true);
    assert_eq!(names(&rows), vec!["first", "second", "x"]);
}

#[test]
fn sort_places_numbers_before_text() {
    let mut rows = vec![priced("text", "n/a"), priced("num", "3"), priced("empty", "")];
    sort_records(&mut rows, Column::PriceText, false);
    assert_eq!(names(&rows), vec!["num", "empty", "text"]);
}

#[test]
fn sort_works_on_borrowed_views() {
    let rows = vec![record(Some(3), "c"), record(Some(1), "a"), record(Some(2), "b")];
    let mut view: Vec<&Record> = rows.iter().collect();
    sort_records(&mut view, Column::ProductId, false);
    assert_eq!(names(&view), vec!["a", "b", "c"]);
    assert_eq!(names(&rows), vec!["c", "a", "b"]);
}

#[test]
fn sort_state_toggles_on_same_column() {
    let first = SortState::toggle(None, Column::Name);
    assert!(!first.descending);
    let second = SortState::toggle(Some(first), Column::Name);
    assert!(second.descending);
    let third = SortState::toggle(Some(second), Column::Name);
    assert!(!third.descending);
}

#[test]
fn sort_state_resets_to_ascending_on_new_column() {
    let state = SortState {
        column: Column::Name,
        descending: true,
    };
    assert_eq!(
        SortState::toggle(Some(state), Column::RatingCount),
        SortState::ascending(Column::RatingCount)
    );
}

#[test]
fn apply_permutation_reorders_by_source_index() {
    let mut rows = vec!['a', 'b', 'c', 'd'];
    apply_permutation(&mut rows, &[2, 0, 3, 1]);
    assert_eq!(rows, vec!['c', 'a', 'd', 'b']);
}
