//! Selling Partner API resources.
//!
//! - [`Marketplace`] / [`Region`]: marketplace IDs and regional hosts
//! - request helpers on [`AmazonClient`](crate::AmazonClient), one per
//!   resource, returning raw JSON
//! - [`MarketplaceParticipation`] / [`ProductTypeSummary`]: typed views
//!   over responses the CLI prints field by field
//!
//! | helper | request |
//! |---|---|
//! | `marketplace_participations` | `GET /sellers/v1/marketplaceParticipations` |
//! | `get_catalog_item` | `GET /catalog/2022-04-01/items/{asin}` |
//! | `search_catalog_items` | `GET /catalog/2022-04-01/items` |
//! | `fba_inventory_summaries` | `GET /fba/inventory/v1/summaries` |
//! | `list_orders` | `GET /orders/v0/orders` |
//! | `list_reports` / `create_report` | `GET` / `POST /reports/2021-06-30/reports` |
//! | `create_feed_document` | `POST /feeds/2021-06-30/documents` |
//! | `upload_feed_document` | `PUT {pre-signed url}` (no auth headers) |
//! | `create_feed` | `POST /feeds/2021-06-30/feeds` |
//! | `search_product_types` | `GET /definitions/2020-09-01/productTypes` |
//! | `get_product_type_definition` | `GET /definitions/2020-09-01/productTypes/{name}` |

mod endpoints;
mod marketplace;
mod models;

pub use endpoints::{
    CATALOG_ITEMS_PATH, FBA_INVENTORY_PATH, FEEDS_PATH, FEED_DOCUMENTS_PATH,
    MARKETPLACE_PARTICIPATIONS_PATH, ORDERS_PATH, POST_PRODUCT_DATA, PRODUCT_TYPES_PATH,
    REPORTS_PATH, XML_FEED_CONTENT_TYPE,
};
pub use marketplace::{Marketplace, Region};
pub use models::{MarketplaceInfo, MarketplaceParticipation, Participation, ProductTypeSummary};
