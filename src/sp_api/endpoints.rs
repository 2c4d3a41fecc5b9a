//! Request helpers for the SP-API resources used by the bridge.
//!
//! Each helper builds one [`ApiRequest`] and sends it through
//! [`AmazonClient::request`], returning the raw JSON body.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::clients::{AmazonClient, ApiError, ApiRequest};
use crate::sp_api::Marketplace;

/// `/catalog/2022-04-01/items`
pub const CATALOG_ITEMS_PATH: &str = "/catalog/2022-04-01/items";
/// `/sellers/v1/marketplaceParticipations`
pub const MARKETPLACE_PARTICIPATIONS_PATH: &str = "/sellers/v1/marketplaceParticipations";
/// `/fba/inventory/v1/summaries`
pub const FBA_INVENTORY_PATH: &str = "/fba/inventory/v1/summaries";
/// `/orders/v0/orders`
pub const ORDERS_PATH: &str = "/orders/v0/orders";
/// `/reports/2021-06-30/reports`
pub const REPORTS_PATH: &str = "/reports/2021-06-30/reports";
/// `/feeds/2021-06-30/documents`
pub const FEED_DOCUMENTS_PATH: &str = "/feeds/2021-06-30/documents";
/// `/feeds/2021-06-30/feeds`
pub const FEEDS_PATH: &str = "/feeds/2021-06-30/feeds";
/// `/definitions/2020-09-01/productTypes`
pub const PRODUCT_TYPES_PATH: &str = "/definitions/2020-09-01/productTypes";

/// Feed type for the XML product feed.
pub const POST_PRODUCT_DATA: &str = "POST_PRODUCT_DATA";
/// Content type of XML feed documents.
pub const XML_FEED_CONTENT_TYPE: &str = "text/xml; charset=UTF-8";

fn marketplace_ids(marketplaces: &[Marketplace]) -> Vec<&'static str> {
    marketplaces.iter().map(|m| m.id()).collect()
}

impl AmazonClient {
    /// `GET /sellers/v1/marketplaceParticipations`.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn marketplace_participations(&mut self) -> Result<Value, ApiError> {
        let request = ApiRequest::get(MARKETPLACE_PARTICIPATIONS_PATH).build()?;
        self.request(&request).await
    }

    /// `GET /catalog/2022-04-01/items/{asin}`.
    ///
    /// `included_data` selects response sections such as `summaries` or
    /// `productTypes`; empty means the API default.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn get_catalog_item(
        &mut self,
        asin: &str,
        marketplace: Marketplace,
        included_data: &[&str],
    ) -> Result<Value, ApiError> {
        let path = format!("{CATALOG_ITEMS_PATH}/{}", urlencoding::encode(asin));
        let request = ApiRequest::get(path)
            .query_param("marketplaceIds", marketplace.id())
            .query_list("includedData", included_data)
            .build()?;
        self.request(&request).await
    }

    /// `GET /catalog/2022-04-01/items?keywords=...`.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn search_catalog_items(
        &mut self,
        keywords: &str,
        marketplace: Marketplace,
        page_size: Option<u32>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(CATALOG_ITEMS_PATH)
            .query_param("keywords", keywords)
            .query_param("marketplaceIds", marketplace.id())
            .query_param_opt("pageSize", page_size.map(|n| n.to_string()))
            .build()?;
        self.request(&request).await
    }

    /// `GET /fba/inventory/v1/summaries` at marketplace granularity.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn fba_inventory_summaries(
        &mut self,
        marketplace: Marketplace,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(FBA_INVENTORY_PATH)
            .query_param("granularityType", "Marketplace")
            .query_param("granularityId", marketplace.id())
            .query_param("marketplaceIds", marketplace.id())
            .build()?;
        self.request(&request).await
    }

    /// `GET /orders/v0/orders` created after `created_after`.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn list_orders(
        &mut self,
        marketplace: Marketplace,
        created_after: DateTime<Utc>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(ORDERS_PATH)
            .query_param("MarketplaceIds", marketplace.id())
            .query_param(
                "CreatedAfter",
                created_after.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            )
            .build()?;
        self.request(&request).await
    }

    /// `GET /reports/2021-06-30/reports`, optionally filtered by type.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn list_reports(&mut self, report_types: &[&str]) -> Result<Value, ApiError> {
        let request = ApiRequest::get(REPORTS_PATH)
            .query_list("reportTypes", report_types)
            .build()?;
        self.request(&request).await
    }

    /// `POST /reports/2021-06-30/reports`.
    ///
    /// The response carries the `reportId`; the report itself is produced
    /// asynchronously by Amazon.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn create_report(
        &mut self,
        report_type: &str,
        marketplaces: &[Marketplace],
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post(REPORTS_PATH)
            .body(json!({
                "reportType": report_type,
                "marketplaceIds": marketplace_ids(marketplaces),
            }))
            .build()?;
        self.request(&request).await
    }

    /// `POST /feeds/2021-06-30/documents`.
    ///
    /// The response carries `feedDocumentId` and the pre-signed upload `url`.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn create_feed_document(&mut self, content_type: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::post(FEED_DOCUMENTS_PATH)
            .body(json!({ "contentType": content_type }))
            .build()?;
        self.request(&request).await
    }

    /// Uploads feed content to the pre-signed `url` from
    /// [`create_feed_document`](Self::create_feed_document).
    ///
    /// # Errors
    ///
    /// See [`HttpClient::upload`](crate::clients::HttpClient::upload).
    pub async fn upload_feed_document(
        &self,
        url: &str,
        content_type: &str,
        content: &str,
    ) -> Result<(), ApiError> {
        self.http()
            .upload(url, content_type, content.as_bytes().to_vec())
            .await
    }

    /// `POST /feeds/2021-06-30/feeds`.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn create_feed(
        &mut self,
        feed_type: &str,
        marketplaces: &[Marketplace],
        input_feed_document_id: &str,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::post(FEEDS_PATH)
            .body(json!({
                "feedType": feed_type,
                "marketplaceIds": marketplace_ids(marketplaces),
                "inputFeedDocumentId": input_feed_document_id,
            }))
            .build()?;
        self.request(&request).await
    }

    /// `GET /definitions/2020-09-01/productTypes`.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn search_product_types(
        &mut self,
        marketplace: Marketplace,
        keywords: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(PRODUCT_TYPES_PATH)
            .query_param("marketplaceIds", marketplace.id())
            .query_param_opt("keywords", keywords)
            .build()?;
        self.request(&request).await
    }

    /// `GET /definitions/2020-09-01/productTypes/{name}`.
    ///
    /// `requirements` is usually `LISTING`.
    ///
    /// # Errors
    ///
    /// Propagates [`AmazonClient::request`] errors.
    pub async fn get_product_type_definition(
        &mut self,
        name: &str,
        marketplace: Marketplace,
        requirements: &str,
    ) -> Result<Value, ApiError> {
        let path = format!("{PRODUCT_TYPES_PATH}/{}", urlencoding::encode(name));
        let request = ApiRequest::get(path)
            .query_param("marketplaceIds", marketplace.id())
            .query_param("requirements", requirements)
            .build()?;
        self.request(&request).await
    }
}
