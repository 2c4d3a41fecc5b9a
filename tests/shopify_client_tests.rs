//! Integration tests for the Shopify Admin API client and the feed pipeline
//! fed by it.

use marketplace_bridge::artifacts::{save_feed, FeedKind};
use marketplace_bridge::feeds::{
    build_inventory_feed, build_price_feed, build_product_feed, InventoryUpdate, PriceUpdate,
    ProductListing,
};
use marketplace_bridge::{ApiError, Secret, ShopDomain, ShopifyClient, ShopifyConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ShopifyClient {
    let config = ShopifyConfig::builder()
        .shop(ShopDomain::new("wipers-shop").unwrap())
        .access_token(Secret::new("shpat_test_token", "access_token").unwrap())
        .base_url(server.uri())
        .build()
        .unwrap();
    ShopifyClient::new(&config).unwrap()
}

fn product_json() -> serde_json::Value {
    serde_json::json!({
        "product": {
            "id": 8_123_456_789_u64,
            "title": "Bosch Aerotwin A950S",
            "vendor": "Bosch",
            "product_type": "Wiper Blades",
            "body_html": "<p>Flat blade.</p><br>Fits most cars.",
            "tags": "wiper, bosch, front",
            "handle": "bosch-aerotwin-a950s",
            "variants": [{
                "id": 1,
                "title": "Default Title",
                "sku": "BSH-A950S01",
                "price": "39.95",
                "inventory_quantity": 12,
                "barcode": null
            }],
            "images": [],
            "created_at": "2024-01-10T09:30:00-05:00"
        }
    })
}

#[tokio::test]
async fn test_get_product_sends_access_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-10/products/8123456789.json"))
        .and(header("x-shopify-access-token", "shpat_test_token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json()))
        .expect(1)
        .mount(&server)
        .await;

    let product = client(&server).get_product(8_123_456_789).await.unwrap();

    assert_eq!(product.id, 8_123_456_789);
    assert_eq!(product.title, "Bosch Aerotwin A950S");
    assert_eq!(product.vendor.as_deref(), Some("Bosch"));
    assert_eq!(product.tag_list(), vec!["wiper", "bosch", "front"]);
    assert_eq!(
        product.main_variant().and_then(|v| v.sku.as_deref()),
        Some("BSH-A950S01")
    );
    assert!(product.created_at.is_some());
}

#[tokio::test]
async fn test_missing_product_field_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-10/products/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let result = client(&server).get_product(1).await;
    assert!(matches!(result, Err(ApiError::Decode { .. })));
}

#[tokio::test]
async fn test_unauthorized_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-10/products.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errors": "[API] Invalid API key or access token (unrecognized login or wrong password)"
        })))
        .mount(&server)
        .await;

    let result = client(&server).list_products(5).await;
    assert_eq!(result.unwrap_err().status_code(), Some(401));
}

#[tokio::test]
async fn test_list_orders_includes_any_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-10/orders.json"))
        .and(query_param("limit", "3"))
        .and(query_param("status", "any"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orders": [{"name": "#1001", "total_price": "39.95"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = client(&server).list_orders(3).await.unwrap();
    assert_eq!(body["orders"][0]["name"], "#1001");
}

#[tokio::test]
async fn test_product_to_feed_files() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/api/2023-10/products/8123456789.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json()))
        .mount(&server)
        .await;

    let product = client(&server).get_product(8_123_456_789).await.unwrap();
    let listing = ProductListing::from_shopify(&product);

    assert_eq!(listing.sku, "BSH-A950S01");
    assert_eq!(listing.brand, "Bosch");
    assert_eq!(listing.description, "Flat blade.\nFits most cars.");
    assert_eq!(listing.bullet_points.len(), 4);
    assert!(listing.upc.is_none());
    assert!(!listing.has_variations);

    let variant = product.main_variant().unwrap();
    let product_xml = build_product_feed("MERCHANT_ID", &listing).unwrap();
    let inventory_xml = build_inventory_feed(
        "MERCHANT_ID",
        &InventoryUpdate::new(&listing.sku, variant.inventory_quantity.unwrap()),
    )
    .unwrap();
    let price_xml = build_price_feed(
        "MERCHANT_ID",
        &PriceUpdate::new(&listing.sku, variant.price_value()),
    )
    .unwrap();

    assert!(!product_xml.contains("StandardProductID"));
    assert!(inventory_xml.contains("<Quantity>12</Quantity>"));
    assert!(price_xml.contains("<StandardPrice currency=\"USD\">39.95</StandardPrice>"));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("amazon_xml_feeds");
    for (kind, xml) in [
        (FeedKind::Product, &product_xml),
        (FeedKind::Inventory, &inventory_xml),
        (FeedKind::Price, &price_xml),
    ] {
        let saved = save_feed(&out, kind, &listing.sku, xml).unwrap();
        assert_eq!(std::fs::read_to_string(saved).unwrap(), *xml);
    }
    assert!(out.join("product_feed_BSH-A950S01.xml").exists());
    assert!(out.join("inventory_feed_BSH-A950S01.xml").exists());
    assert!(out.join("price_feed_BSH-A950S01.xml").exists());
}
