//! Feed inputs and the Shopify → Amazon listing mapping.

use std::fmt;

use chrono::{NaiveDate, Utc};

use crate::shopify::ShopifyProduct;

/// Tax code written when none is set: general goods, not taxed.
pub const DEFAULT_TAX_CODE: &str = "A_GEN_NOTAX";
/// `AutomotiveMisc/ProductType` written when none is set.
pub const DEFAULT_AUTOMOTIVE_PRODUCT_TYPE: &str = "Wiper Blade";
/// Brand and manufacturer used when the vendor is empty.
pub const DEFAULT_BRAND: &str = "Generic";
/// First bullet point of every mapped listing.
pub const DEFAULT_BULLET: &str = "Compatible with various vehicle models";
/// Handling time in days for inventory updates.
pub const DEFAULT_FULFILLMENT_LATENCY: u32 = 2;
/// Currency of price updates.
pub const DEFAULT_CURRENCY: &str = "USD";

const MAX_BULLET_POINTS: usize = 5;

/// Amazon browse category chosen for a listing.
///
/// Reported to the operator; it is not part of the product feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Automotive → Replacement Parts.
    AutomotiveReplacementParts,
    /// Tools & Home Improvement → Automotive.
    ToolsAutomotive,
}

impl Category {
    /// Picks the category from a Shopify product type and tags.
    #[must_use]
    pub fn detect(product_type: &str, tags: &str) -> Self {
        if product_type.to_lowercase().contains("wiper")
            || tags.to_lowercase().contains("automotive")
        {
            Self::AutomotiveReplacementParts
        } else {
            Self::ToolsAutomotive
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutomotiveReplacementParts => f.write_str("Automotive / Replacement Parts"),
            Self::ToolsAutomotive => f.write_str("Tools & Home Improvement / Automotive"),
        }
    }
}

/// Contents of a product feed message.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::feeds::{build_product_feed, ProductListing};
///
/// let listing = ProductListing::new("BSH-A950S01", "Bosch Aerotwin A950S", "Bosch");
/// let xml = build_product_feed("MERCHANT_ID", &listing).unwrap();
/// assert!(xml.contains("<SKU>BSH-A950S01</SKU>"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProductListing {
    /// Seller SKU.
    pub sku: String,
    /// `DescriptiveData/Title`.
    pub title: String,
    /// `DescriptiveData/Brand`.
    pub brand: String,
    /// `DescriptiveData/Manufacturer`.
    pub manufacturer: String,
    /// `DescriptiveData/Description`.
    pub description: String,
    /// `DescriptiveData/BulletPoint`, in order.
    pub bullet_points: Vec<String>,
    /// UPC for `StandardProductID`; omitted when `None`.
    pub upc: Option<String>,
    /// `ProductTaxCode`.
    pub tax_code: String,
    /// `LaunchDate`.
    pub launch_date: NaiveDate,
    /// `ProductData/Automotive/AutomotiveMisc/ProductType`.
    pub product_type: String,
    /// Writes `VariationData` when `true`.
    pub has_variations: bool,
    /// Browse category, informational.
    pub category: Category,
}

impl ProductListing {
    /// A listing with defaults for everything but SKU, title and brand.
    ///
    /// Manufacturer is the brand, description is the title, launch date is
    /// today (UTC).
    #[must_use]
    pub fn new(sku: impl Into<String>, title: impl Into<String>, brand: impl Into<String>) -> Self {
        let title = title.into();
        let brand = brand.into();
        Self {
            sku: sku.into(),
            description: title.clone(),
            title,
            manufacturer: brand.clone(),
            brand,
            bullet_points: Vec::new(),
            upc: None,
            tax_code: DEFAULT_TAX_CODE.to_string(),
            launch_date: Utc::now().date_naive(),
            product_type: DEFAULT_AUTOMOTIVE_PRODUCT_TYPE.to_string(),
            has_variations: false,
            category: Category::ToolsAutomotive,
        }
    }

    /// Maps a Shopify product onto a listing.
    ///
    /// - SKU: main variant's SKU, else `SHOPIFY_{id}`
    /// - brand and manufacturer: vendor, else `Generic`
    /// - description: `body_html` with paragraph tags stripped and `<br>`
    ///   turned into newlines, else the title
    /// - bullets: a fixed compatibility line, then up to four tags,
    ///   capitalized
    /// - UPC: main variant's barcode
    /// - variations: more than one variant
    #[must_use]
    pub fn from_shopify(product: &ShopifyProduct) -> Self {
        let main_variant = product.main_variant();

        let sku = main_variant
            .and_then(|v| non_empty(v.sku.as_deref()))
            .map_or_else(|| format!("SHOPIFY_{}", product.id), str::to_string);
        let brand = non_empty(product.vendor.as_deref()).unwrap_or(DEFAULT_BRAND);

        let mut listing = Self::new(sku, product.title.clone(), brand);

        let description = strip_paragraph_html(product.body_html.as_deref().unwrap_or_default());
        if !description.trim().is_empty() {
            listing.description = description;
        }

        listing.bullet_points = std::iter::once(DEFAULT_BULLET.to_string())
            .chain(product.tag_list().into_iter().map(capitalize))
            .take(MAX_BULLET_POINTS)
            .collect();

        listing.upc = main_variant
            .and_then(|v| non_empty(v.barcode.as_deref()))
            .map(str::to_string);
        listing.has_variations = product.variants.len() > 1;
        listing.category = Category::detect(
            product.product_type.as_deref().unwrap_or_default(),
            product.tags.as_deref().unwrap_or_default(),
        );

        listing
    }
}

/// Contents of an inventory feed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryUpdate {
    /// Seller SKU.
    pub sku: String,
    /// Available quantity; written clamped to zero.
    pub quantity: i64,
    /// Handling time in days.
    pub fulfillment_latency: u32,
}

impl InventoryUpdate {
    /// An update with the default fulfillment latency.
    #[must_use]
    pub fn new(sku: impl Into<String>, quantity: i64) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            fulfillment_latency: DEFAULT_FULFILLMENT_LATENCY,
        }
    }

    /// Quantity as written to the feed.
    #[must_use]
    pub fn clamped_quantity(&self) -> i64 {
        self.quantity.max(0)
    }
}

/// Contents of a price feed message.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceUpdate {
    /// Seller SKU.
    pub sku: String,
    /// Price in `currency`.
    pub amount: f64,
    /// ISO currency code.
    pub currency: String,
}

impl PriceUpdate {
    /// A USD price update.
    #[must_use]
    pub fn new(sku: impl Into<String>, amount: f64) -> Self {
        Self {
            sku: sku.into(),
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Amount with two decimals.
    #[must_use]
    pub fn formatted_amount(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn strip_paragraph_html(html: &str) -> String {
    html.replace("<p>", "")
        .replace("</p>", "")
        .replace("<br>", "\n")
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
