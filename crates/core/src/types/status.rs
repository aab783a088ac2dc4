//! Status and kind enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Publication status of a catalog product.
///
/// Maps to the catalog API's status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ProductStatus {
    /// Parse a wire value, defaulting to [`Self::Draft`] for anything unknown.
    ///
    /// The normalizer must never fail on a malformed bundle, so an unexpected
    /// status degrades to the most restrictive one.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// What a catalog entry represents.
///
/// Meridian's catalog mixes finished products, raw materials, and services;
/// the distinction only affects labeling on the front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    #[default]
    Product,
    Material,
    Service,
}

impl ProductKind {
    /// Parse a wire value, defaulting to [`Self::Product`] for anything unknown.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Material => write!(f, "material"),
            Self::Service => write!(f, "service"),
        }
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(Self::Product),
            "material" => Ok(Self::Material),
            "service" => Ok(Self::Service),
            _ => Err(format!("invalid product kind: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ProductStatus::Draft,
            ProductStatus::Published,
            ProductStatus::Archived,
        ] {
            assert_eq!(status.to_string().parse::<ProductStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_unknown_values_default() {
        assert_eq!(ProductStatus::parse_or_default("live"), ProductStatus::Draft);
        assert_eq!(ProductKind::parse_or_default("widget"), ProductKind::Product);
    }

    #[test]
    fn test_serde_snake_case() {
        let kind: ProductKind = serde_json::from_str("\"material\"").expect("kind");
        assert_eq!(kind, ProductKind::Material);
        assert_eq!(
            serde_json::to_string(&ProductStatus::Published).expect("serialize"),
            "\"published\""
        );
    }
}
