//! Flattening of a color-variants payload into [`Record`] rows.
//!
//! The payload is a JSON object mapping a product-group id to an array of
//! variant items:
//!
//! ```json
//! { "123456": [ { "id": 1, "name": "...", "price": { "current": 100 } } ] }
//! ```
//!
//! Every field is optional. Extraction never fails: a missing, `null` or
//! mistyped value takes the default documented on [`Record`].

use serde_json::{Map, Value};
use variantdesk_core::{ProductId, Record};

/// Prefix joined verbatim with an item's relative `url`.
pub const PRODUCT_URL_PREFIX: &str = "https://www.trendyol.com";

/// Normalizes a raw payload into one [`Record`] per variant item.
///
/// A payload that is not a JSON object yields no records. Top-level keys
/// whose value is not an array are skipped, as are array entries that are
/// not objects.
#[must_use]
pub fn normalize(payload: &Value) -> Vec<Record> {
    let Some(groups) = payload.as_object() else {
        return Vec::new();
    };

    groups
        .iter()
        .filter_map(|(group_id, items)| Some((group_id, items.as_array()?)))
        .flat_map(|(group_id, items)| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(move |item| normalize_item(group_id, item))
        })
        .collect()
}

fn normalize_item(group_id: &str, item: &Map<String, Value>) -> Record {
    let empty = Map::new();
    let price = item.get("price").and_then(Value::as_object).unwrap_or(&empty);
    let rating = item
        .get("ratingScore")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let barcode = text(item.get("barcode"))
        .filter(|s| !s.is_empty())
        .or_else(|| text(item.get("mpn")).filter(|s| !s.is_empty()))
        .unwrap_or_default();

    let url = item
        .get("url")
        .and_then(Value::as_str)
        .filter(|path| !path.is_empty())
        .map(|path| format!("{PRODUCT_URL_PREFIX}{path}"))
        .unwrap_or_default();

    Record {
        group_id: group_id.to_owned(),
        product_id: product_id(item.get("id")),
        barcode,
        name: text(item.get("name")),
        price_current: number(price.get("current")),
        price_text: text(price.get("currentText")),
        currency: text(price.get("currency")),
        rating_average: number(rating.get("averageRating")),
        rating_count: number(rating.get("totalCount")),
        url,
        image: text(item.get("image")),
        big_image: text(item.get("bigImage")),
        labels: labels(item.get("labels")),
    }
}

/// Strings pass through; numbers and booleans use their JSON text.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Integral numbers, including ones written as floats (`1.0`), become
/// [`ProductId::Int`] so they de-duplicate against their integer form.
/// Other numbers keep their JSON text.
fn product_id(value: Option<&Value>) -> Option<ProductId> {
    match value? {
        Value::Number(n) => Some(
            n.as_i64()
                .or_else(|| n.as_f64().and_then(integral))
                .map_or_else(|| ProductId::Text(n.to_string()), ProductId::Int),
        ),
        Value::String(s) => Some(ProductId::Text(s.clone())),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(value: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

fn labels(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_array)
        .map(|labels| {
            labels
                .iter()
                .filter_map(|label| text(Some(label)))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
