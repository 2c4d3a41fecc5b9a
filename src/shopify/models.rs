//! Product types returned by the Admin REST API.
//!
//! Shopify sends `null` for many unset fields, so nearly everything is an
//! `Option`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Shopify product, as returned by `GET /products/{id}.json`.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::shopify::{ShopifyProduct, ShopifyVariant};
///
/// let product = ShopifyProduct {
///     id: 8_123_456_789,
///     title: "Bosch Aerotwin A950S".to_string(),
///     vendor: Some("Bosch".to_string()),
///     variants: vec![ShopifyVariant {
///         sku: Some("BSH-A950S01".to_string()),
///         price: Some("39.95".to_string()),
///         ..Default::default()
///     }],
///     ..Default::default()
/// };
///
/// assert_eq!(product.main_variant().and_then(|v| v.sku.as_deref()), Some("BSH-A950S01"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShopifyProduct {
    /// Product ID.
    pub id: u64,

    /// Product title.
    #[serde(default)]
    pub title: String,

    /// Vendor or brand name.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Merchant-defined product type, e.g. `Wiper Blades`.
    #[serde(default)]
    pub product_type: Option<String>,

    /// Description HTML.
    #[serde(default)]
    pub body_html: Option<String>,

    /// Comma-separated tags.
    #[serde(default)]
    pub tags: Option<String>,

    /// URL handle.
    #[serde(default)]
    pub handle: Option<String>,

    /// Variants, main variant first.
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,

    /// Images in display order.
    #[serde(default)]
    pub images: Vec<ShopifyImage>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ShopifyProduct {
    /// The first variant, which Shopify treats as the default one.
    #[must_use]
    pub fn main_variant(&self) -> Option<&ShopifyVariant> {
        self.variants.first()
    }

    /// Tags split on commas, trimmed, empties dropped.
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// A product variant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShopifyVariant {
    /// Variant ID.
    #[serde(default)]
    pub id: Option<u64>,

    /// Variant title, e.g. `650mm / 400mm`.
    #[serde(default)]
    pub title: Option<String>,

    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,

    /// Price as a decimal string, e.g. `"39.95"`.
    #[serde(default)]
    pub price: Option<String>,

    /// Weight in the store's weight unit.
    #[serde(default)]
    pub weight: Option<f64>,

    /// Available quantity; may be negative when overselling is allowed.
    #[serde(default)]
    pub inventory_quantity: Option<i64>,

    /// Barcode (UPC/EAN/ISBN).
    #[serde(default)]
    pub barcode: Option<String>,
}

impl ShopifyVariant {
    /// Price parsed as a number, 0.0 when absent or malformed.
    #[must_use]
    pub fn price_value(&self) -> f64 {
        self.price
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0.0)
    }
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShopifyImage {
    /// CDN URL.
    #[serde(default)]
    pub src: Option<String>,

    /// Alternative text.
    #[serde(default)]
    pub alt: Option<String>,

    /// 1-based position.
    #[serde(default)]
    pub position: Option<i64>,
}
