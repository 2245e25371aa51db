use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Storefront a tracked product belongs to.
///
/// Serialized in `snake_case` (`"reliance_digital"`, `"iqoo"`). Older form
/// submissions labelled Apple as `"unicorn"`; that spelling is still accepted
/// when parsing. Ordering follows declaration order, which is also the order
/// stores are listed to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    Amazon,
    Flipkart,
    Croma,
    #[serde(alias = "unicorn")]
    Apple,
    Vivo,
    Iqoo,
    RelianceDigital,
    Oppo,
    Jiomart,
    Unknown,
}

impl StoreType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoreType::Amazon => "amazon",
            StoreType::Flipkart => "flipkart",
            StoreType::Croma => "croma",
            StoreType::Apple => "apple",
            StoreType::Vivo => "vivo",
            StoreType::Iqoo => "iqoo",
            StoreType::RelianceDigital => "reliance_digital",
            StoreType::Oppo => "oppo",
            StoreType::Jiomart => "jiomart",
            StoreType::Unknown => "unknown",
        }
    }

    /// Human-facing store name, e.g. `"Reliance Digital"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StoreType::Amazon => "Amazon",
            StoreType::Flipkart => "Flipkart",
            StoreType::Croma => "Croma",
            StoreType::Apple => "Apple",
            StoreType::Vivo => "Vivo",
            StoreType::Iqoo => "iQOO",
            StoreType::RelianceDigital => "Reliance Digital",
            StoreType::Oppo => "OPPO",
            StoreType::Jiomart => "Jiomart",
            StoreType::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown store type: {0}")]
pub struct ParseStoreTypeError(pub String);

impl std::str::FromStr for StoreType {
    type Err = ParseStoreTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amazon" => Ok(StoreType::Amazon),
            "flipkart" => Ok(StoreType::Flipkart),
            "croma" => Ok(StoreType::Croma),
            "apple" | "unicorn" => Ok(StoreType::Apple),
            "vivo" => Ok(StoreType::Vivo),
            "iqoo" => Ok(StoreType::Iqoo),
            "reliance_digital" => Ok(StoreType::RelianceDigital),
            "oppo" => Ok(StoreType::Oppo),
            "jiomart" => Ok(StoreType::Jiomart),
            "unknown" => Ok(StoreType::Unknown),
            other => Err(ParseStoreTypeError(other.to_string())),
        }
    }
}

/// Result of resolving a pasted product URL: the identifier later used for
/// availability lookups plus a store-prefixed display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSource {
    /// Display name, e.g. `"(Amazon) Product Name"`.
    pub name: String,
    pub product_id: String,
    pub store_type: StoreType,
    /// Apple part number, OPPO SKU, or Reliance Digital URL slug.
    pub part_number: Option<String>,
}

/// One purchasable OPPO configuration returned by the product-detail API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OppoVariant {
    pub sku: String,
    pub name: String,
}

/// Fields accepted by the product store when tracking a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    /// URL exactly as the user pasted it.
    pub url: String,
    pub product_id: String,
    pub store_type: StoreType,
    pub part_number: Option<String>,
    pub affiliate_link: Option<String>,
}

impl NewProduct {
    /// Combines a resolved source with the submitted URL and affiliate link.
    #[must_use]
    pub fn from_source(source: ProductSource, url: &str, affiliate_link: Option<String>) -> Self {
        Self {
            name: source.name,
            url: url.to_owned(),
            product_id: source.product_id,
            store_type: source.store_type,
            part_number: source.part_number,
            affiliate_link,
        }
    }
}

/// A tracked product as persisted by the product store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub product_id: String,
    pub store_type: StoreType,
    pub part_number: Option<String>,
    pub affiliate_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Link to share in alerts: the affiliate link when one was given,
    /// otherwise the original product URL.
    #[must_use]
    pub fn share_link(&self) -> &str {
        self.affiliate_link.as_deref().unwrap_or(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_type_serializes_snake_case() {
        let json = serde_json::to_string(&StoreType::RelianceDigital).unwrap();
        assert_eq!(json, "\"reliance_digital\"");
    }

    #[test]
    fn store_type_accepts_unicorn_alias() {
        let parsed: StoreType = serde_json::from_str("\"unicorn\"").unwrap();
        assert_eq!(parsed, StoreType::Apple);
        assert_eq!("unicorn".parse::<StoreType>().unwrap(), StoreType::Apple);
    }

    #[test]
    fn store_type_from_str_rejects_unknown_values() {
        let err = "walmart".parse::<StoreType>().unwrap_err();
        assert_eq!(err, ParseStoreTypeError("walmart".to_string()));
    }

    #[test]
    fn store_type_display_matches_serde_name() {
        for store in [
            StoreType::Amazon,
            StoreType::Iqoo,
            StoreType::RelianceDigital,
            StoreType::Jiomart,
        ] {
            let json = serde_json::to_string(&store).unwrap();
            assert_eq!(json, format!("\"{store}\""));
        }
    }

    #[test]
    fn product_source_uses_camel_case_keys() {
        let source = ProductSource {
            name: "(Apple) iphone 16".to_string(),
            product_id: "MG6P4HN/A".to_string(),
            store_type: StoreType::Apple,
            part_number: Some("MG6P4HN/A".to_string()),
        };
        let value = serde_json::to_value(&source).unwrap();
        assert_eq!(value["productId"], "MG6P4HN/A");
        assert_eq!(value["storeType"], "apple");
        assert_eq!(value["partNumber"], "MG6P4HN/A");
    }

    #[test]
    fn share_link_prefers_affiliate_link() {
        let mut product = Product {
            id: Uuid::new_v4(),
            name: "(Croma) phone".to_string(),
            url: "https://www.croma.com/phone/p/123".to_string(),
            product_id: "123".to_string(),
            store_type: StoreType::Croma,
            part_number: None,
            affiliate_link: None,
            created_at: Utc::now(),
        };
        assert_eq!(product.share_link(), "https://www.croma.com/phone/p/123");

        product.affiliate_link = Some("https://aff.example/x".to_string());
        assert_eq!(product.share_link(), "https://aff.example/x");
    }
}
