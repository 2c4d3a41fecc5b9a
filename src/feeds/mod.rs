//! Amazon XML feed assembly.
//!
//! Builds the one-message `AmazonEnvelope` documents used to create a
//! listing (`Product`), set its stock (`Inventory`) and set its price
//! (`Price`). Output is deterministic for a given input, pretty-printed with
//! two-space indentation, starts with an XML declaration, and always parses:
//! all text goes through the writer's escaping.
//!
//! ```text
//! AmazonEnvelope
//!   Header / DocumentVersion, MerchantIdentifier
//!   MessageType
//!   PurgeAndReplace        (product feed only)
//!   Message / MessageID, OperationType, <Product|Inventory|Price>
//! ```

mod error;
mod listing;
mod writer;

pub use error::FeedError;
pub use listing::{
    Category, InventoryUpdate, PriceUpdate, ProductListing, DEFAULT_AUTOMOTIVE_PRODUCT_TYPE,
    DEFAULT_BRAND, DEFAULT_BULLET, DEFAULT_CURRENCY, DEFAULT_FULFILLMENT_LATENCY,
    DEFAULT_TAX_CODE,
};
pub use writer::MessageType;

use writer::write_envelope;

/// Builds the product feed for one listing.
///
/// # Errors
///
/// Returns [`FeedError`] if the writer fails.
pub fn build_product_feed(merchant_id: &str, listing: &ProductListing) -> Result<String, FeedError> {
    write_envelope(merchant_id, MessageType::Product, Some(false), |w| {
        w.text_element("SKU", &listing.sku)?;

        if let Some(upc) = &listing.upc {
            w.start("StandardProductID")?;
            w.text_element("Type", "UPC")?;
            w.text_element("Value", upc)?;
            w.end("StandardProductID")?;
        }

        w.text_element("ProductTaxCode", &listing.tax_code)?;
        w.text_element(
            "LaunchDate",
            &listing.launch_date.format("%Y-%m-%d").to_string(),
        )?;

        w.start("DescriptiveData")?;
        w.text_element("Title", &listing.title)?;
        w.text_element("Brand", &listing.brand)?;
        w.text_element("Description", &listing.description)?;
        w.text_element("Manufacturer", &listing.manufacturer)?;
        for bullet in &listing.bullet_points {
            w.text_element("BulletPoint", bullet)?;
        }
        w.end("DescriptiveData")?;

        w.start("ProductData")?;
        w.start("Automotive")?;
        w.start("AutomotiveMisc")?;
        w.text_element("ProductType", &listing.product_type)?;
        w.end("AutomotiveMisc")?;
        if listing.has_variations {
            w.start("VariationData")?;
            w.text_element("Parentage", "parent")?;
            w.text_element("VariationTheme", "Size")?;
            w.end("VariationData")?;
        }
        w.end("Automotive")?;
        w.end("ProductData")
    })
}

/// Builds the inventory feed for one SKU. Negative quantities are written
/// as 0.
///
/// # Errors
///
/// Returns [`FeedError`] if the writer fails.
pub fn build_inventory_feed(
    merchant_id: &str,
    update: &InventoryUpdate,
) -> Result<String, FeedError> {
    write_envelope(merchant_id, MessageType::Inventory, None, |w| {
        w.text_element("SKU", &update.sku)?;
        w.text_element("Quantity", &update.clamped_quantity().to_string())?;
        w.text_element(
            "FulfillmentLatency",
            &update.fulfillment_latency.to_string(),
        )
    })
}

/// Builds the price feed for one SKU.
///
/// # Errors
///
/// Returns [`FeedError`] if the writer fails.
pub fn build_price_feed(merchant_id: &str, update: &PriceUpdate) -> Result<String, FeedError> {
    write_envelope(merchant_id, MessageType::Price, None, |w| {
        w.text_element("SKU", &update.sku)?;
        w.text_element_with(
            "StandardPrice",
            &[("currency", update.currency.as_str())],
            &update.formatted_amount(),
        )
    })
}
