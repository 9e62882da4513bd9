use serde_json::json;

use super::*;
use variantdesk_core::RecordStore;

// -----------------------------------------------------------------------
// normalize
// -----------------------------------------------------------------------

#[test]
fn normalize_single_item_scenario() {
    let payload = json!({
        "g1": [{
            "id": 1,
            "name": "Shoe",
            "price": {"current": 100, "currentText": "100 TRY", "currency": "TRY"},
            "url": "/shoe"
        }]
    });

    let records = normalize(&payload);

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.group_id, "g1");
    assert_eq!(r.product_id, Some(ProductId::Int(1)));
    assert_eq!(r.name.as_deref(), Some("Shoe"));
    assert_eq!(r.url, "https://www.trendyol.com/shoe");
    assert_eq!(r.price_current, Some(100.0));
    assert_eq!(r.price_text.as_deref(), Some("100 TRY"));
    assert_eq!(r.currency.as_deref(), Some("TRY"));
}

#[test]
fn normalize_counts_one_record_per_item() {
    let payload = json!({
        "a": [{"id": 1}, {"id": 2}, {"id": 3}],
        "b": [],
        "c": [{"id": 4}]
    });
    assert_eq!(normalize(&payload).len(), 4);
}

#[test]
fn normalize_skips_non_array_groups() {
    let payload = json!({
        "a": [{"id": 1}],
        "meta": {"page": 1},
        "count": 2,
        "b": [{"id": 2}]
    });
    let records = normalize(&payload);
    let groups: Vec<&str> = records.iter().map(|r| r.group_id.as_str()).collect();
    assert_eq!(groups, vec!["a", "b"]);
}

#[test]
fn normalize_keeps_payload_key_order() {
    let payload: serde_json::Value =
        serde_json::from_str(r#"{"zeta": [{"id": 1}], "alpha": [{"id": 2}]}"#).unwrap();
    let groups: Vec<String> = normalize(&payload).into_iter().map(|r| r.group_id).collect();
    assert_eq!(groups, vec!["zeta", "alpha"]);
}

#[test]
fn normalize_non_mapping_payload_is_empty() {
    assert!(normalize(&json!([{"id": 1}])).is_empty());
    assert!(normalize(&json!("text")).is_empty());
    assert!(normalize(&json!(null)).is_empty());
    assert!(normalize(&json!(42)).is_empty());
}

#[test]
fn normalize_skips_items_that_are_not_objects() {
    let payload = json!({"g": [{"id": 1}, 7, "x", null, {"id": 2}]});
    assert_eq!(normalize(&payload).len(), 2);
}

#[test]
fn normalize_applies_defaults_for_bare_item() {
    let records = normalize(&json!({"g": [{}]}));
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.product_id, None);
    assert_eq!(r.barcode, "");
    assert_eq!(r.url, "");
    assert_eq!(r.labels, "");
    assert!(r.name.is_none());
    assert!(r.price_current.is_none());
    assert!(r.rating_average.is_none());
    assert!(r.image.is_none());
}

#[test]
fn normalize_treats_null_nested_objects_as_empty() {
    let payload = json!({"g": [{"id": 1, "price": null, "ratingScore": "n/a"}]});
    let records = normalize(&payload);
    assert!(records[0].price_current.is_none());
    assert!(records[0].rating_count.is_none());
}

#[test]
fn normalize_reads_rating_and_images() {
    let payload = json!({"g": [{
        "id": 9,
        "ratingScore": {"averageRating": 4.6, "totalCount": 120},
        "image": "/img/small.jpg",
        "bigImage": "/img/big.jpg"
    }]});
    let r = &normalize(&payload)[0];
    assert_eq!(r.rating_average, Some(4.6));
    assert_eq!(r.rating_count, Some(120.0));
    assert_eq!(r.image.as_deref(), Some("/img/small.jpg"));
    assert_eq!(r.big_image.as_deref(), Some("/img/big.jpg"));
}

#[test]
fn normalize_barcode_falls_back_to_mpn() {
    let payload = json!({"g": [
        {"id": 1, "barcode": "869000", "mpn": "M-1"},
        {"id": 2, "barcode": "", "mpn": "M-2"},
        {"id": 3, "mpn": 12345},
        {"id": 4}
    ]});
    let barcodes: Vec<String> = normalize(&payload).into_iter().map(|r| r.barcode).collect();
    assert_eq!(barcodes, vec!["869000", "M-2", "12345", ""]);
}

#[test]
fn normalize_url_prefix_is_verbatim() {
    let payload = json!({"g": [
        {"id": 1, "url": "shoe-no-slash"},
        {"id": 2, "url": "//double"},
        {"id": 3, "url": ""}
    ]});
    let urls: Vec<String> = normalize(&payload).into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.trendyol.comshoe-no-slash",
            "https://www.trendyol.com//double",
            ""
        ]
    );
}

#[test]
fn normalize_joins_labels() {
    let payload = json!({"g": [
        {"id": 1, "labels": ["new", "fast delivery"]},
        {"id": 2, "labels": null},
        {"id": 3, "labels": "not-a-list"}
    ]});
    let labels: Vec<String> = normalize(&payload).into_iter().map(|r| r.labels).collect();
    assert_eq!(labels, vec!["new, fast delivery", "", ""]);
}

#[test]
fn normalize_keeps_string_and_large_ids() {
    let payload = json!({"g": [
        {"id": "abc-1"},
        {"id": 18_446_744_073_709_551_615_u64},
        {"id": [1]}
    ]});
    let ids: Vec<Option<ProductId>> = normalize(&payload)
        .into_iter()
        .map(|r| r.product_id)
        .collect();
    assert_eq!(
        ids,
        vec![
            Some(ProductId::from("abc-1")),
            Some(ProductId::Text("18446744073709551615".to_owned())),
            None
        ]
    );
}

#[test]
fn normalize_accepts_numeric_strings_for_prices() {
    let payload = json!({"g": [{"price": {"current": " 49.5 "}}]});
    assert_eq!(normalize(&payload)[0].price_current, Some(49.5));
}

#[test]
fn normalize_reads_integral_float_ids_as_integers() {
    let payload = json!({"g": [{"id": 1.0}, {"id": -7.0}, {"id": 1.5}, {"id": 1e300}]});
    let ids: Vec<Option<ProductId>> = normalize(&payload)
        .into_iter()
        .map(|r| r.product_id)
        .collect();
    assert_eq!(
        ids,
        vec![
            Some(ProductId::Int(1)),
            Some(ProductId::Int(-7)),
            Some(ProductId::Text("1.5".to_owned())),
            Some(ProductId::Text("1e300".to_owned())),
        ]
    );
}

#[test]
fn integral_float_id_merges_with_integer_id() {
    let payload = json!({"g": [{"id": 1, "name": "A"}, {"id": 1.0, "name": "B"}]});
    let mut store = RecordStore::new();
    let added = store.merge(normalize(&payload));

    assert_eq!(added, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name.as_deref(), Some("A"));
}
