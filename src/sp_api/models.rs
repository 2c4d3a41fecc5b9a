//! Typed views over the few SP-API responses the CLI prints field by field.
//!
//! Everything else is handled as raw JSON.

use serde::Deserialize;
use serde_json::Value;

use crate::clients::ApiError;

/// One entry of `GET /sellers/v1/marketplaceParticipations`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceParticipation {
    /// The storefront.
    #[serde(default)]
    pub marketplace: MarketplaceInfo,
    /// The seller's standing in it.
    #[serde(default)]
    pub participation: Participation,
    /// Seller's store name, when reported.
    #[serde(default)]
    pub store_name: Option<String>,
}

/// Storefront details inside a participation entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketplaceInfo {
    /// Marketplace ID, e.g. `ATVPDKIKX0DER`.
    pub id: String,
    /// Display name, e.g. `Amazon.com`.
    pub name: String,
    /// ISO country code.
    pub country_code: String,
    /// ISO currency code.
    pub default_currency_code: String,
    /// Language tag, e.g. `en_US`.
    pub default_language_code: String,
    /// Storefront domain.
    pub domain_name: String,
}

/// Seller status in a marketplace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participation {
    /// Whether the seller can sell there.
    pub is_participating: bool,
    /// Whether some listings are suspended.
    pub has_suspended_listings: bool,
}

impl MarketplaceParticipation {
    /// Extracts the `payload` array of a participations response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `payload` is missing or malformed.
    pub fn from_response(body: &Value) -> Result<Vec<Self>, ApiError> {
        decode_array(body, "payload")
    }
}

/// One entry of `GET /definitions/2020-09-01/productTypes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductTypeSummary {
    /// Product type name, e.g. `AUTO_ACCESSORY`.
    pub name: String,
    /// Human-readable name.
    pub display_name: String,
    /// Marketplaces where the type is available.
    pub marketplace_ids: Vec<String>,
}

impl ProductTypeSummary {
    /// Extracts the `productTypes` array of a search response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `productTypes` is missing or
    /// malformed.
    pub fn from_response(body: &Value) -> Result<Vec<Self>, ApiError> {
        decode_array(body, "productTypes")
    }
}

fn decode_array<T: for<'de> Deserialize<'de>>(body: &Value, key: &str) -> Result<Vec<T>, ApiError> {
    let items = body.get(key).ok_or_else(|| ApiError::Decode {
        reason: format!("response has no '{key}' field"),
    })?;
    Vec::<T>::deserialize(items).map_err(|e| ApiError::Decode {
        reason: format!("'{key}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_participations_from_sandbox_payload() {
        let body = json!({
            "payload": [{
                "marketplace": {
                    "id": "ATVPDKIKX0DER",
                    "name": "Amazon.com",
                    "countryCode": "US",
                    "defaultCurrencyCode": "USD",
                    "defaultLanguageCode": "en_US",
                    "domainName": "www.amazon.com"
                },
                "participation": {
                    "isParticipating": true,
                    "hasSuspendedListings": false
                },
                "storeName": "Wiper Depot"
            }]
        });

        let participations = MarketplaceParticipation::from_response(&body).unwrap();
        assert_eq!(participations.len(), 1);
        let first = &participations[0];
        assert_eq!(first.marketplace.id, "ATVPDKIKX0DER");
        assert_eq!(first.marketplace.domain_name, "www.amazon.com");
        assert!(first.participation.is_participating);
        assert!(!first.participation.has_suspended_listings);
        assert_eq!(first.store_name.as_deref(), Some("Wiper Depot"));
    }

    #[test]
    fn test_missing_fields_default() {
        let body = json!({"payload": [{"marketplace": {"id": "A39IBJ37TRP1C6"}}]});
        let participations = MarketplaceParticipation::from_response(&body).unwrap();
        assert_eq!(participations[0].marketplace.name, "");
        assert!(!participations[0].participation.is_participating);
    }

    #[test]
    fn test_missing_payload_is_decode_error() {
        let result = MarketplaceParticipation::from_response(&json!({"errors": []}));
        assert!(matches!(result, Err(ApiError::Decode { .. })));
    }

    #[test]
    fn test_product_types() {
        let body = json!({
            "productTypes": [
                {"name": "AUTO_ACCESSORY", "displayName": "Auto Accessory", "marketplaceIds": ["ATVPDKIKX0DER"]},
                {"name": "WIPER_BLADE"}
            ],
            "productTypeVersion": "LATEST"
        });

        let types = ProductTypeSummary::from_response(&body).unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].display_name, "Auto Accessory");
        assert_eq!(types[1].name, "WIPER_BLADE");
        assert!(types[1].marketplace_ids.is_empty());
    }
}
