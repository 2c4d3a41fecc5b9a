//! Executes parsed commands.

use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use crate::artifacts::{save_feed, save_json, FeedKind};
use crate::cli::report::{check_env, count_at, str_at, summary_table, ProbeOutcome};
use crate::cli::{AmazonCommand, Cli, CliError, Commands, ShopifyCommand};
use crate::clients::{AmazonClient, ShopifyClient};
use crate::config::{load_dotenv, AmazonConfig, ShopifyConfig, SpApiEnvironment};
use crate::feeds::{
    build_inventory_feed, build_price_feed, build_product_feed, InventoryUpdate, PriceUpdate,
    ProductListing,
};
use crate::sp_api::{
    MarketplaceParticipation, ProductTypeSummary, POST_PRODUCT_DATA, XML_FEED_CONTENT_TYPE,
};

/// Requirements set fetched by `product-types --definition`.
const DEFINITION_REQUIREMENTS: &str = "LISTING";

/// Orders window used when `--created-after` is absent.
const DEFAULT_ORDER_DAYS: i64 = 30;

/// Runs one parsed [`Cli`] invocation.
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Creates a runner.
    #[must_use]
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Loads `.env`, then executes the command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when configuration is invalid, the token cannot
    /// be acquired, or the command's primary call fails.
    pub async fn run(self) -> Result<(), CliError> {
        load_dotenv();

        match &self.cli.command {
            Commands::CheckEnv => Self::env_check(),
            Commands::Amazon { command } => self.amazon(command).await,
            Commands::Shopify { command } => self.shopify(command).await,
            Commands::Integration => self.integration().await,
            Commands::SyncProduct {
                product_id,
                out_dir,
                submit,
            } => self.sync_product(*product_id, out_dir, *submit).await,
        }
    }

    fn amazon_config(&self) -> Result<AmazonConfig, CliError> {
        let mut config = AmazonConfig::from_env()?.with_marketplace(self.cli.marketplace);
        if self.cli.production {
            config = config.with_environment(SpApiEnvironment::Production);
        }
        Ok(config)
    }

    /// Builds the client and acquires the token up front.
    async fn amazon_client(&self) -> Result<AmazonClient, CliError> {
        let mut client = AmazonClient::new(&self.amazon_config()?)?;
        println!(
            "SP-API {} at {} (marketplace {})",
            client.environment(),
            client.base_url(),
            client.marketplace()
        );

        let token = client.authenticate().await?;
        println!(
            "Token acquired: {} token, expires in {}s",
            token.token_type, token.expires_in
        );
        Ok(client)
    }

    fn shopify_client() -> Result<ShopifyClient, CliError> {
        let client = ShopifyClient::new(&ShopifyConfig::from_env()?)?;
        println!("Shopify Admin API at {}", client.base_url());
        Ok(client)
    }

    fn env_check() -> Result<(), CliError> {
        let report = check_env(|name| std::env::var(name).ok());
        println!("Environment:");
        print!("{report}");

        if report.is_complete() {
            println!("All required variables are set.");
            Ok(())
        } else {
            Err(CliError::MissingEnv(report.missing()))
        }
    }

    async fn amazon(&self, command: &AmazonCommand) -> Result<(), CliError> {
        let mut client = self.amazon_client().await?;
        let marketplace = client.marketplace();

        match command {
            AmazonCommand::Token => Ok(()),

            AmazonCommand::Marketplaces => {
                let body = client.marketplace_participations().await?;
                let participations = MarketplaceParticipation::from_response(&body)?;
                println!("{} marketplace participations:", participations.len());
                for p in &participations {
                    println!(
                        "  {} {} ({}, {}) participating: {}",
                        p.marketplace.id,
                        p.marketplace.name,
                        p.marketplace.country_code,
                        p.marketplace.default_currency_code,
                        p.participation.is_participating
                    );
                }
                Ok(())
            }

            AmazonCommand::CatalogItem {
                asins,
                included_data,
            } => {
                let included: Vec<&str> = included_data.iter().map(String::as_str).collect();
                let mut first_error = None;
                for asin in asins {
                    match client.get_catalog_item(asin, marketplace, &included).await {
                        Ok(item) => println!(
                            "  {asin}: {}",
                            str_at(&item, "/summaries/0/itemName")
                        ),
                        Err(e) => {
                            println!("  {asin}: failed: {e}");
                            if first_error.is_none() {
                                first_error = Some(e);
                            }
                        }
                    }
                }
                first_error.map_or(Ok(()), |e| Err(e.into()))
            }

            AmazonCommand::CatalogSearch {
                keywords,
                page_size,
            } => {
                let body = client
                    .search_catalog_items(keywords, marketplace, Some(*page_size))
                    .await?;
                println!(
                    "{} results for '{keywords}'",
                    body.get("numberOfResults")
                        .and_then(Value::as_u64)
                        .unwrap_or_default()
                );
                for item in body.get("items").and_then(Value::as_array).into_iter().flatten() {
                    println!(
                        "  {}: {}",
                        str_at(item, "/asin"),
                        str_at(item, "/summaries/0/itemName")
                    );
                }
                Ok(())
            }

            AmazonCommand::Inventory => {
                let body = client.fba_inventory_summaries(marketplace).await?;
                let summaries = body
                    .pointer("/payload/inventorySummaries")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                println!("{} inventory summaries", summaries.len());
                for summary in summaries {
                    println!(
                        "  {} (ASIN {}): {} fulfillable",
                        str_at(summary, "/sellerSku"),
                        str_at(summary, "/asin"),
                        summary
                            .pointer("/inventoryDetails/fulfillableQuantity")
                            .or_else(|| summary.get("totalQuantity"))
                            .and_then(Value::as_i64)
                            .unwrap_or_default()
                    );
                }
                Ok(())
            }

            AmazonCommand::Orders { created_after } => {
                let since = created_after.map_or_else(
                    || Utc::now() - Duration::days(DEFAULT_ORDER_DAYS),
                    start_of_day,
                );
                let body = client.list_orders(marketplace, since).await?;
                println!(
                    "{} orders since {}",
                    count_at(&body, "/payload/Orders").unwrap_or_default(),
                    since.format("%Y-%m-%d")
                );
                let orders = body
                    .pointer("/payload/Orders")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for order in orders {
                    println!(
                        "  {} {} {}",
                        str_at(order, "/AmazonOrderId"),
                        str_at(order, "/OrderStatus"),
                        str_at(order, "/PurchaseDate")
                    );
                }
                Ok(())
            }

            AmazonCommand::Reports {
                create,
                report_types,
            } => {
                if let Some(report_type) = create {
                    let body = client.create_report(report_type, &[marketplace]).await?;
                    println!(
                        "Requested {report_type}: report {}",
                        str_at(&body, "/reportId")
                    );
                    return Ok(());
                }

                let types: Vec<&str> = report_types.iter().map(String::as_str).collect();
                let body = client.list_reports(&types).await?;
                let reports = body
                    .get("reports")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                println!("{} reports", reports.len());
                for report in reports {
                    println!(
                        "  {} {} {}",
                        str_at(report, "/reportId"),
                        str_at(report, "/reportType"),
                        str_at(report, "/processingStatus")
                    );
                }
                Ok(())
            }

            AmazonCommand::ProductTypes {
                keywords,
                definition,
                out_dir,
            } => {
                let body = client
                    .search_product_types(marketplace, keywords.as_deref())
                    .await?;
                let product_types = ProductTypeSummary::from_response(&body)?;
                println!("{} product types", product_types.len());
                for product_type in &product_types {
                    println!("  {} ({})", product_type.name, product_type.display_name);
                }
                if let Some(dir) = out_dir {
                    let path = save_json(dir, "product_types", &body)?;
                    println!("Saved {}", path.display());
                }

                if let Some(name) = definition {
                    let body = client
                        .get_product_type_definition(name, marketplace, DEFINITION_REQUIREMENTS)
                        .await?;
                    println!(
                        "{name} definition, schema at {}",
                        str_at(&body, "/schema/link/resource")
                    );
                    if let Some(dir) = out_dir {
                        let path = save_json(dir, &format!("{name}_definition"), &body)?;
                        println!("Saved {}", path.display());
                    }
                }
                Ok(())
            }
        }
    }

    async fn shopify(&self, command: &ShopifyCommand) -> Result<(), CliError> {
        let client = Self::shopify_client()?;

        match command {
            ShopifyCommand::Products { limit } => {
                let body = client.list_products(*limit).await?;
                print_rows(&body, "products", &["/id", "/title", "/vendor"]);
            }
            ShopifyCommand::Orders { limit } => {
                let body = client.list_orders(*limit).await?;
                print_rows(
                    &body,
                    "orders",
                    &["/name", "/financial_status", "/total_price"],
                );
            }
        }
        Ok(())
    }

    /// Probes both APIs. Only configuration errors and a failed token fetch
    /// end the run early; every other failure is recorded in the summary.
    async fn integration(&self) -> Result<(), CliError> {
        Self::env_check()?;

        let mut outcomes = Vec::new();

        let mut amazon = self.amazon_client().await?;
        let marketplace = amazon.marketplace();
        outcomes.push(ProbeOutcome {
            name: "Amazon token",
            result: Ok(amazon
                .token()
                .map(|t| format!("expires in {}s", t.expires_in))
                .unwrap_or_default()),
        });

        let participations = amazon.marketplace_participations().await;
        outcomes.push(ProbeOutcome::from_result(
            "Amazon marketplaces",
            participations,
            |body| format!("{} participations", count_at(body, "/payload").unwrap_or_default()),
        ));

        let inventory = amazon.fba_inventory_summaries(marketplace).await;
        outcomes.push(ProbeOutcome::from_result("Amazon inventory", inventory, |body| {
            format!(
                "{} summaries",
                count_at(body, "/payload/inventorySummaries").unwrap_or_default()
            )
        }));

        let shopify = Self::shopify_client()?;

        let products = shopify.list_products(5).await;
        outcomes.push(ProbeOutcome::from_result("Shopify products", products, |body| {
            format!("{} products", count_at(body, "/products").unwrap_or_default())
        }));

        let orders = shopify.list_orders(5).await;
        outcomes.push(ProbeOutcome::from_result("Shopify orders", orders, |body| {
            format!("{} orders", count_at(body, "/orders").unwrap_or_default())
        }));

        println!("\nSummary:");
        print!("{}", summary_table(&outcomes));
        Ok(())
    }

    async fn sync_product(
        &self,
        product_id: u64,
        out_dir: &Path,
        submit: bool,
    ) -> Result<(), CliError> {
        let amazon_config = self.amazon_config()?;
        let shopify = Self::shopify_client()?;

        let product = shopify.get_product(product_id).await?;
        println!("Fetched '{}' ({} variants)", product.title, product.variants.len());

        let listing = ProductListing::from_shopify(&product);
        let main_variant = product.main_variant();
        let inventory = InventoryUpdate::new(
            listing.sku.clone(),
            main_variant
                .and_then(|v| v.inventory_quantity)
                .unwrap_or_default(),
        );
        let price = PriceUpdate::new(
            listing.sku.clone(),
            main_variant.map(|v| v.price_value()).unwrap_or_default(),
        );

        let merchant_id = amazon_config.merchant_id();
        let product_feed = build_product_feed(merchant_id, &listing)?;
        let feeds = [
            (FeedKind::Product, product_feed.clone()),
            (FeedKind::Inventory, build_inventory_feed(merchant_id, &inventory)?),
            (FeedKind::Price, build_price_feed(merchant_id, &price)?),
        ];
        for (kind, xml) in &feeds {
            let path = save_feed(out_dir, *kind, &listing.sku, xml)?;
            println!("Saved {kind} feed: {}", path.display());
        }

        if !submit {
            return Ok(());
        }

        let mut amazon = self.amazon_client().await?;
        let marketplace = amazon.marketplace();
        let document = amazon.create_feed_document(XML_FEED_CONTENT_TYPE).await?;
        let document_id = required_str(&document, "feedDocumentId")?;
        let upload_url = required_str(&document, "url")?;

        amazon
            .upload_feed_document(upload_url, XML_FEED_CONTENT_TYPE, &product_feed)
            .await?;
        let feed = amazon
            .create_feed(POST_PRODUCT_DATA, &[marketplace], document_id)
            .await?;
        println!(
            "Submitted {POST_PRODUCT_DATA} for {}: feed {}",
            listing.sku,
            str_at(&feed, "/feedId")
        );
        Ok(())
    }
}

fn start_of_day(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

fn required_str<'a>(body: &'a Value, field: &str) -> Result<&'a str, CliError> {
    body.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| CliError::UnexpectedResponse(format!("missing '{field}'")))
}

/// Prints one line per element of `body[key]` with the given fields.
fn print_rows(body: &Value, key: &str, fields: &[&str]) {
    let rows = body
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    println!("{} {key}", rows.len());
    for row in rows {
        let cells: Vec<String> = fields
            .iter()
            .map(|field| match row.pointer(field) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => "-".to_string(),
                Some(other) => other.to_string(),
            })
            .collect();
        println!("  {}", cells.join("  "));
    }
}
