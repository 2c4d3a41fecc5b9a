//! Shopify Admin API version.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Shopify Admin API version used in the `/admin/api/{version}` path.
///
/// Shopify releases versions quarterly (January, April, July, October),
/// plus a rolling `unstable` version.
///
/// # Example
///
/// ```rust
/// use marketplace_bridge::ApiVersion;
///
/// let version: ApiVersion = "2024-10".parse().unwrap();
/// assert_eq!(version.to_string(), "2024-10");
/// assert_eq!(ApiVersion::default().to_string(), "2023-10");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// A dated quarterly release.
    Release {
        /// Four-digit year.
        year: u16,
        /// Release month: 1, 4, 7 or 10.
        month: u8,
    },
    /// The rolling unstable version.
    Unstable,
}

impl ApiVersion {
    /// The version used when `SHOPIFY_API_VERSION` is not set.
    pub const DEFAULT: Self = Self::Release {
        year: 2023,
        month: 10,
    };

    /// Returns `true` for dated releases.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Release { .. })
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Unstable => f.write_str("unstable"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "unstable" {
            return Ok(Self::Unstable);
        }

        let invalid = || ConfigError::InvalidApiVersion { version: s.clone() };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: u16 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;

        // Quarterly releases only.
        if !matches!(month, 1 | 4 | 7 | 10) {
            return Err(invalid());
        }

        Ok(Self::Release { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_release_and_unstable() {
        assert_eq!(
            "2024-10".parse::<ApiVersion>().unwrap(),
            ApiVersion::Release {
                year: 2024,
                month: 10
            }
        );
        assert_eq!(
            " UNSTABLE ".parse::<ApiVersion>().unwrap(),
            ApiVersion::Unstable
        );
    }

    #[test]
    fn test_display_is_zero_padded() {
        let version = ApiVersion::Release {
            year: 2025,
            month: 1,
        };
        assert_eq!(version.to_string(), "2025-01");
    }

    #[test]
    fn test_rejects_invalid() {
        assert!("invalid".parse::<ApiVersion>().is_err());
        assert!("2024".parse::<ApiVersion>().is_err());
        assert!("2024-1".parse::<ApiVersion>().is_err());
        assert!("2024-02".parse::<ApiVersion>().is_err());
        assert!("24-01".parse::<ApiVersion>().is_err());
        assert!("abcd-01".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_default_and_ordering() {
        assert_eq!(ApiVersion::default().to_string(), "2023-10");
        assert!(ApiVersion::default().is_stable());
        assert!("2023-10".parse::<ApiVersion>().unwrap() < "2024-01".parse().unwrap());
        assert!("2025-10".parse::<ApiVersion>().unwrap() < ApiVersion::Unstable);
    }
}
