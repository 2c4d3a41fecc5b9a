//! Command-line driver.
//!
//! # Usage
//!
//! ```bash
//! # Check which variables are set
//! mpbridge check-env
//!
//! # Probe SP-API (sandbox unless --production)
//! mpbridge amazon token
//! mpbridge amazon catalog-item B08N5WRWNW
//! mpbridge --marketplace AU amazon product-types --keywords wiper --out-dir schemas
//!
//! # Probe Shopify
//! mpbridge shopify products --limit 5
//!
//! # Build feeds for one Shopify product and optionally submit them
//! mpbridge sync-product 8123456789 --out-dir amazon_xml_feeds --submit
//! ```
//!
//! Exit code 1 on invalid configuration, failed token acquisition, or a
//! failed primary call.

mod report;
mod runner;

pub use report::{check_env, EnvReport, EnvVarStatus, ProbeOutcome};
pub use runner::Runner;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::artifacts::ArtifactError;
use crate::clients::ApiError;
use crate::error::ConfigError;
use crate::feeds::FeedError;
use crate::sp_api::Marketplace;

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "mpbridge")]
#[command(author, version, about = "Shopify to Amazon SP-API bridge and probes")]
pub struct Cli {
    /// Use the production SP-API host instead of the sandbox
    #[arg(long, global = true)]
    pub production: bool,

    /// Marketplace code (US, CA, MX, AU, UK, DE, FR, IT, ES, JP) or ID
    #[arg(long, global = true, default_value = "US", value_parser = parse_marketplace)]
    pub marketplace: Marketplace,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_marketplace(value: &str) -> Result<Marketplace, ConfigError> {
    value.parse()
}

/// Commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report which environment variables are set
    CheckEnv,

    /// Amazon SP-API probes
    Amazon {
        #[command(subcommand)]
        command: AmazonCommand,
    },

    /// Shopify Admin API probes
    Shopify {
        #[command(subcommand)]
        command: ShopifyCommand,
    },

    /// Check env, then probe both APIs and print a summary
    Integration,

    /// Build product, inventory and price feeds for a Shopify product
    SyncProduct {
        /// Shopify product ID
        product_id: u64,

        /// Directory for the XML files
        #[arg(long, default_value = "amazon_xml_feeds")]
        out_dir: PathBuf,

        /// Upload the product feed and create a POST_PRODUCT_DATA feed
        #[arg(long)]
        submit: bool,
    },
}

/// `amazon` subcommands.
#[derive(Debug, Subcommand)]
pub enum AmazonCommand {
    /// Acquire an LWA access token
    Token,

    /// List marketplace participations
    Marketplaces,

    /// Look up catalog items by ASIN
    CatalogItem {
        /// One or more ASINs
        #[arg(required = true)]
        asins: Vec<String>,

        /// Response sections, comma-separated
        #[arg(long, value_delimiter = ',', default_value = "summaries")]
        included_data: Vec<String>,
    },

    /// Search the catalog by keywords
    CatalogSearch {
        /// Search keywords
        keywords: String,

        /// Results per page
        #[arg(long, default_value_t = 5)]
        page_size: u32,
    },

    /// FBA inventory summaries for the marketplace
    Inventory,

    /// Orders created after a date (default: 30 days ago)
    Orders {
        /// YYYY-MM-DD
        #[arg(long)]
        created_after: Option<NaiveDate>,
    },

    /// List reports, or request a new one
    Reports {
        /// Request a report of this type, e.g. GET_MERCHANT_LISTINGS_ALL_DATA
        #[arg(long)]
        create: Option<String>,

        /// Filter the listing by report type, comma-separated
        #[arg(long = "type", value_delimiter = ',')]
        report_types: Vec<String>,
    },

    /// Search product types, optionally fetching one definition
    ProductTypes {
        /// Search keywords
        #[arg(long)]
        keywords: Option<String>,

        /// Fetch the LISTING definition of this product type
        #[arg(long)]
        definition: Option<String>,

        /// Save JSON responses here
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// `shopify` subcommands.
#[derive(Debug, Subcommand)]
pub enum ShopifyCommand {
    /// List products
    Products {
        /// Maximum number of products
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },

    /// List orders in any status
    Orders {
        /// Maximum number of orders
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
}

/// Errors that end a command with exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is invalid or incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Required variables are missing.
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Feed assembly failed.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Writing an artifact failed.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// A response lacked a field the command needs.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mpbridge",
            "amazon",
            "inventory",
            "--production",
            "--marketplace",
            "au",
        ])
        .unwrap();

        assert!(cli.production);
        assert_eq!(cli.marketplace, Marketplace::Australia);
        assert!(matches!(
            cli.command,
            Commands::Amazon {
                command: AmazonCommand::Inventory
            }
        ));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mpbridge", "sync-product", "42"]).unwrap();
        assert!(!cli.production);
        assert_eq!(cli.marketplace, Marketplace::UnitedStates);
        match cli.command {
            Commands::SyncProduct {
                product_id,
                out_dir,
                submit,
            } => {
                assert_eq!(product_id, 42);
                assert_eq!(out_dir, PathBuf::from("amazon_xml_feeds"));
                assert!(!submit);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_list_arguments() {
        let cli = Cli::try_parse_from([
            "mpbridge",
            "amazon",
            "catalog-item",
            "B08N5WRWNW",
            "B07XJ8C8F5",
            "--included-data",
            "summaries,productTypes",
        ])
        .unwrap();

        match cli.command {
            Commands::Amazon {
                command:
                    AmazonCommand::CatalogItem {
                        asins,
                        included_data,
                    },
            } => {
                assert_eq!(asins, vec!["B08N5WRWNW", "B07XJ8C8F5"]);
                assert_eq!(included_data, vec!["summaries", "productTypes"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_marketplace_is_rejected() {
        let result = Cli::try_parse_from(["mpbridge", "--marketplace", "XX", "check-env"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_env_message_lists_names() {
        let error = CliError::MissingEnv(vec!["AMAZON_CLIENT_ID", "SHOPIFY_ACCESS_TOKEN"]);
        assert_eq!(
            error.to_string(),
            "Missing environment variables: AMAZON_CLIENT_ID, SHOPIFY_ACCESS_TOKEN"
        );
    }
}
