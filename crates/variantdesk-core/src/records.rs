//! Flat product-variant rows produced from a color-variants payload.
//!
//! A [`Record`] is one row of the grid and of the exported spreadsheet.
//! [`Column`] fixes the order in which fields are displayed and exported,
//! and [`Record::cell`] gives the string form used by search and sort.

use serde::Serialize;
use thiserror::Error;

/// Product identifier as it appeared in the payload.
///
/// Integral JSON numbers (`1` as well as `1.0`) become `Int`; strings and
/// any other number are kept verbatim as `Text`. De-duplication compares these
/// values directly, so `7` and `"7"` are distinct products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Int(id) => write!(f, "{id}"),
            ProductId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Int(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_owned())
    }
}

/// One normalized product-variant entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    /// Top-level payload key the item was listed under.
    pub group_id: String,
    /// Primary de-duplication key; absent ids are never de-duplicated.
    pub product_id: Option<ProductId>,
    /// `barcode`, falling back to `mpn`; empty when neither is present.
    pub barcode: String,
    pub name: Option<String>,
    pub price_current: Option<f64>,
    /// Display price, e.g. `"100 TL"`.
    pub price_text: Option<String>,
    pub currency: Option<String>,
    pub rating_average: Option<f64>,
    pub rating_count: Option<f64>,
    /// Absolute storefront URL, or empty when the item had no relative path.
    pub url: String,
    pub image: Option<String>,
    pub big_image: Option<String>,
    /// Label strings joined with `", "`.
    pub labels: String,
}

impl Record {
    /// String form of a single field.
    ///
    /// Absent values render as an empty string and numbers use the shortest
    /// round-trip representation (`100.0` renders as `"100"`).
    #[must_use]
    pub fn cell(&self, column: Column) -> String {
        fn opt_text(value: Option<&String>) -> String {
            value.cloned().unwrap_or_default()
        }
        fn opt_num(value: Option<f64>) -> String {
            value.map(|n| n.to_string()).unwrap_or_default()
        }

        match column {
            Column::GroupId => self.group_id.clone(),
            Column::ProductId => self
                .product_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            Column::Barcode => self.barcode.clone(),
            Column::Name => opt_text(self.name.as_ref()),
            Column::PriceCurrent => opt_num(self.price_current),
            Column::PriceText => opt_text(self.price_text.as_ref()),
            Column::Currency => opt_text(self.currency.as_ref()),
            Column::RatingAverage => opt_num(self.rating_average),
            Column::RatingCount => opt_num(self.rating_count),
            Column::Url => self.url.clone(),
            Column::Image => opt_text(self.image.as_ref()),
            Column::BigImage => opt_text(self.big_image.as_ref()),
            Column::Labels => self.labels.clone(),
        }
    }

    /// All cells in [`Column::ALL`] order.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| self.cell(*c)).collect()
    }

    /// Numeric value of a field, for spreadsheet cells that should stay
    /// numbers. `None` for text columns, absent values and text ids.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::ProductId => match self.product_id {
                Some(ProductId::Int(id)) => Some(id as f64),
                _ => None,
            },
            Column::PriceCurrent => self.price_current,
            Column::RatingAverage => self.rating_average,
            Column::RatingCount => self.rating_count,
            _ => None,
        }
    }
}

/// Grid / spreadsheet columns, one per [`Record`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    GroupId,
    ProductId,
    Barcode,
    Name,
    PriceCurrent,
    PriceText,
    Currency,
    RatingAverage,
    RatingCount,
    Url,
    Image,
    BigImage,
    Labels,
}

impl Column {
    /// Fixed display and export order.
    pub const ALL: [Column; 13] = [
        Column::GroupId,
        Column::ProductId,
        Column::Barcode,
        Column::Name,
        Column::PriceCurrent,
        Column::PriceText,
        Column::Currency,
        Column::RatingAverage,
        Column::RatingCount,
        Column::Url,
        Column::Image,
        Column::BigImage,
        Column::Labels,
    ];

    /// Header name, identical to the [`Record`] field name.
    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Column::GroupId => "group_id",
            Column::ProductId => "product_id",
            Column::Barcode => "barcode",
            Column::Name => "name",
            Column::PriceCurrent => "price_current",
            Column::PriceText => "price_text",
            Column::Currency => "currency",
            Column::RatingAverage => "rating_average",
            Column::RatingCount => "rating_count",
            Column::Url => "url",
            Column::Image => "image",
            Column::BigImage => "big_image",
            Column::Labels => "labels",
        }
    }

    #[must_use]
    pub fn headers() -> Vec<&'static str> {
        Column::ALL.iter().map(|c| c.header()).collect()
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown column \"{0}\"")]
pub struct UnknownColumn(pub String);

impl std::str::FromStr for Column {
    type Err = UnknownColumn;

    /// Accepts header names case-insensitively, with `-` or `_` separators,
    /// plus the labels shown in the desktop grid
    /// (`"Product Name"`, `"ProductID"`, `"Price (TRY)"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        let column = match key.as_str() {
            "group_id" | "productgroupid" | "group" => Column::GroupId,
            "product_id" | "productid" | "id" => Column::ProductId,
            "barcode" | "mpn" => Column::Barcode,
            "name" | "product name" | "product_name" => Column::Name,
            "price_current" | "price" | "price (try)" => Column::PriceCurrent,
            "price_text" | "price text" => Column::PriceText,
            "currency" => Column::Currency,
            "rating_average" | "rating" => Column::RatingAverage,
            "rating_count" | "review count" | "reviews" => Column::RatingCount,
            "url" => Column::Url,
            "image" => Column::Image,
            "big_image" | "big image" => Column::BigImage,
            "labels" => Column::Labels,
            _ => return Err(UnknownColumn(s.to_owned())),
        };
        Ok(column)
    }
}
