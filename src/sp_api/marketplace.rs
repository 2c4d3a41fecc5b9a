//! Marketplace IDs and regional SP-API endpoints.

use std::fmt;
use std::str::FromStr;

use crate::config::SpApiEnvironment;
use crate::error::ConfigError;

/// SP-API region. Each region has its own API host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// North America.
    NorthAmerica,
    /// Europe, including the UK.
    Europe,
    /// Far East, including Australia and Japan.
    FarEast,
}

impl Region {
    /// Host name for `environment`, e.g.
    /// `sandbox.sellingpartnerapi-fe.amazon.com`.
    #[must_use]
    pub const fn host(self, environment: SpApiEnvironment) -> &'static str {
        match (self, environment) {
            (Self::NorthAmerica, SpApiEnvironment::Production) => {
                "sellingpartnerapi-na.amazon.com"
            }
            (Self::NorthAmerica, SpApiEnvironment::Sandbox) => {
                "sandbox.sellingpartnerapi-na.amazon.com"
            }
            (Self::Europe, SpApiEnvironment::Production) => "sellingpartnerapi-eu.amazon.com",
            (Self::Europe, SpApiEnvironment::Sandbox) => "sandbox.sellingpartnerapi-eu.amazon.com",
            (Self::FarEast, SpApiEnvironment::Production) => "sellingpartnerapi-fe.amazon.com",
            (Self::FarEast, SpApiEnvironment::Sandbox) => "sandbox.sellingpartnerapi-fe.amazon.com",
        }
    }

    /// Short code: `NA`, `EU` or `FE`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NorthAmerica => "NA",
            Self::Europe => "EU",
            Self::FarEast => "FE",
        }
    }
}

/// An Amazon storefront.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::{Marketplace, Region};
///
/// let au: Marketplace = "australia".parse().unwrap();
/// assert_eq!(au.id(), "A39IBJ37TRP1C6");
/// assert_eq!(au.region(), Region::FarEast);
///
/// let us: Marketplace = "ATVPDKIKX0DER".parse().unwrap();
/// assert_eq!(us, Marketplace::UnitedStates);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Marketplace {
    /// amazon.com
    #[default]
    UnitedStates,
    /// amazon.ca
    Canada,
    /// amazon.com.mx
    Mexico,
    /// amazon.com.au
    Australia,
    /// amazon.co.uk
    UnitedKingdom,
    /// amazon.de
    Germany,
    /// amazon.fr
    France,
    /// amazon.it
    Italy,
    /// amazon.es
    Spain,
    /// amazon.co.jp
    Japan,
}

impl Marketplace {
    /// Every supported marketplace.
    pub const ALL: [Self; 10] = [
        Self::UnitedStates,
        Self::Canada,
        Self::Mexico,
        Self::Australia,
        Self::UnitedKingdom,
        Self::Germany,
        Self::France,
        Self::Italy,
        Self::Spain,
        Self::Japan,
    ];

    /// The opaque marketplace ID used in `marketplaceIds` parameters.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::UnitedStates => "ATVPDKIKX0DER",
            Self::Canada => "A2EUQ1WTGCTBG2",
            Self::Mexico => "A1AM78C64UM0Y8",
            Self::Australia => "A39IBJ37TRP1C6",
            Self::UnitedKingdom => "A1F83G8C2ARO7P",
            Self::Germany => "A1PA6795UKMFR9",
            Self::France => "A13V1IB3VIYZZH",
            Self::Italy => "APJ6JRA9NG5V4",
            Self::Spain => "A1RKKUPIHCS9HS",
            Self::Japan => "A1VC38T7YXB528",
        }
    }

    /// Two-letter country code.
    #[must_use]
    pub const fn country_code(self) -> &'static str {
        match self {
            Self::UnitedStates => "US",
            Self::Canada => "CA",
            Self::Mexico => "MX",
            Self::Australia => "AU",
            Self::UnitedKingdom => "UK",
            Self::Germany => "DE",
            Self::France => "FR",
            Self::Italy => "IT",
            Self::Spain => "ES",
            Self::Japan => "JP",
        }
    }

    /// Region hosting this marketplace's API.
    #[must_use]
    pub const fn region(self) -> Region {
        match self {
            Self::UnitedStates | Self::Canada | Self::Mexico => Region::NorthAmerica,
            Self::Australia | Self::Japan => Region::FarEast,
            Self::UnitedKingdom | Self::Germany | Self::France | Self::Italy | Self::Spain => {
                Region::Europe
            }
        }
    }

    /// Looks up a marketplace by its ID.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.country_code())
    }
}

impl FromStr for Marketplace {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(marketplace) = Self::from_id(trimmed) {
            return Ok(marketplace);
        }

        match trimmed.to_uppercase().as_str() {
            "US" | "USA" | "UNITED STATES" => Ok(Self::UnitedStates),
            "CA" | "CANADA" => Ok(Self::Canada),
            "MX" | "MEXICO" => Ok(Self::Mexico),
            "AU" | "AUSTRALIA" => Ok(Self::Australia),
            "UK" | "GB" | "UNITED KINGDOM" => Ok(Self::UnitedKingdom),
            "DE" | "GERMANY" => Ok(Self::Germany),
            "FR" | "FRANCE" => Ok(Self::France),
            "IT" | "ITALY" => Ok(Self::Italy),
            "ES" | "SPAIN" => Ok(Self::Spain),
            "JP" | "JAPAN" => Ok(Self::Japan),
            _ => Err(ConfigError::UnknownMarketplace {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_mapping() {
        assert_eq!(Marketplace::UnitedStates.region(), Region::NorthAmerica);
        assert_eq!(Marketplace::Mexico.region(), Region::NorthAmerica);
        assert_eq!(Marketplace::Australia.region(), Region::FarEast);
        assert_eq!(Marketplace::Japan.region(), Region::FarEast);
        assert_eq!(Marketplace::UnitedKingdom.region(), Region::Europe);
        assert_eq!(Marketplace::Spain.region(), Region::Europe);
    }

    #[test]
    fn test_hosts() {
        assert_eq!(
            Region::NorthAmerica.host(SpApiEnvironment::Sandbox),
            "sandbox.sellingpartnerapi-na.amazon.com"
        );
        assert_eq!(
            Region::Europe.host(SpApiEnvironment::Production),
            "sellingpartnerapi-eu.amazon.com"
        );
        for region in [Region::NorthAmerica, Region::Europe, Region::FarEast] {
            let sandbox = region.host(SpApiEnvironment::Sandbox);
            let production = region.host(SpApiEnvironment::Production);
            assert_eq!(sandbox, format!("sandbox.{production}"));
        }
    }

    #[test]
    fn test_ids_are_unique_and_round_trip() {
        for marketplace in Marketplace::ALL {
            assert_eq!(Marketplace::from_id(marketplace.id()), Some(marketplace));
            assert_eq!(
                marketplace.country_code().parse::<Marketplace>().unwrap(),
                marketplace
            );
        }
    }

    #[test]
    fn test_parse_names_case_insensitively() {
        assert_eq!(
            "usa".parse::<Marketplace>().unwrap(),
            Marketplace::UnitedStates
        );
        assert_eq!(
            " Australia ".parse::<Marketplace>().unwrap(),
            Marketplace::Australia
        );
        assert_eq!(
            "gb".parse::<Marketplace>().unwrap(),
            Marketplace::UnitedKingdom
        );
        assert!(matches!(
            "atlantis".parse::<Marketplace>(),
            Err(ConfigError::UnknownMarketplace { .. })
        ));
    }
}
