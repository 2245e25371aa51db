//! OPPO variant lookup.
//!
//! OPPO product URLs end in `.P.P<digits>`; the `P<digits>` part is the
//! product code the mall gateway expects. One product code covers several
//! SKUs (colour and storage combinations), and tracking needs one SKU.

use std::sync::LazyLock;

use pricetrack_core::OppoVariant;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::client::StoreClient;
use crate::error::ScraperError;

static PRODUCT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.P\.(P\d+)").expect("valid product code regex"));

const CLIENT_VERSION: &str = "13.0.0.0";
const GATEWAY_USER_AGENT: &str = "Mozilla/5.0";

/// Request body for the mall gateway's product-detail endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailRequest<'a> {
    product_code: &'a str,
    user_group_name: &'a str,
    store_view_code: &'a str,
    config_module: u8,
    settle_channel: u8,
}

impl<'a> DetailRequest<'a> {
    fn for_product(product_code: &'a str) -> Self {
        Self {
            product_code,
            user_group_name: "",
            store_view_code: "in",
            config_module: 3,
            settle_channel: 3,
        }
    }
}

/// Only `data.products[].{skuCode,name}` is read; both levels may be absent.
#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(default)]
    data: Option<DetailData>,
}

#[derive(Debug, Deserialize)]
struct DetailData {
    #[serde(default)]
    products: Option<Vec<DetailProduct>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailProduct {
    #[serde(default)]
    sku_code: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl DetailResponse {
    /// Variants with a SKU; entries without one are dropped on their own so
    /// the rest of the list survives.
    fn into_variants(self) -> Vec<OppoVariant> {
        self.data
            .and_then(|d| d.products)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| {
                let sku = p.sku_code.filter(|s| !s.trim().is_empty())?;
                Some(OppoVariant {
                    sku,
                    name: p.name.unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// Extracts the `P<digits>` product code from an OPPO product URL.
#[must_use]
pub fn extract_oppo_product_code(url: &str) -> Option<String> {
    PRODUCT_CODE_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

impl StoreClient {
    /// Lists the SKUs available for the OPPO product at `url`.
    ///
    /// Returns an empty list without any request when the URL carries no
    /// product code.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure.
    /// - [`ScraperError::UnexpectedStatus`] for a non-2xx response.
    /// - [`ScraperError::Deserialize`] if the body is not the expected JSON.
    pub async fn try_fetch_oppo_variants(
        &self,
        url: &str,
    ) -> Result<Vec<OppoVariant>, ScraperError> {
        let Some(product_code) = extract_oppo_product_code(url) else {
            tracing::debug!(url, "no OPPO product code in URL");
            return Ok(Vec::new());
        };

        let endpoint = self.oppo_detail_url.as_str();
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::USER_AGENT, GATEWAY_USER_AGENT)
            .header("client-version", CLIENT_VERSION)
            .header("platform", "web")
            .header("language", "en-IN")
            .json(&DetailRequest::for_product(&product_code))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: endpoint.to_owned(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<DetailResponse>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("OPPO product detail for {product_code}"),
                source: e,
            }
        })?;

        let variants = parsed.into_variants();

        tracing::debug!(
            product_code = %product_code,
            variant_count = variants.len(),
            "fetched OPPO variants"
        );
        Ok(variants)
    }

    /// Best-effort variant of [`Self::try_fetch_oppo_variants`]: any failure
    /// is logged and yields an empty list.
    pub async fn fetch_oppo_variants(&self, url: &str) -> Vec<OppoVariant> {
        match self.try_fetch_oppo_variants(url).await {
            Ok(variants) => variants,
            Err(e) => {
                tracing::warn!(url, error = %e, "OPPO variant lookup failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_product_code() {
        assert_eq!(
            extract_oppo_product_code(
                "https://www.oppo.com/in/smartphones/series-f/f27-pro-plus/.P.P100112?x=1"
            )
            .as_deref(),
            Some("P100112")
        );
    }

    #[test]
    fn product_code_match_is_case_insensitive() {
        assert_eq!(
            extract_oppo_product_code("https://www.oppo.com/in/x/.p.p2002").as_deref(),
            Some("p2002")
        );
    }

    #[test]
    fn no_product_code_without_marker() {
        assert_eq!(
            extract_oppo_product_code("https://www.oppo.com/in/smartphones/"),
            None
        );
    }

    #[test]
    fn request_body_has_fixed_shape() {
        let body = serde_json::to_value(DetailRequest::for_product("P100112")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "productCode": "P100112",
                "userGroupName": "",
                "storeViewCode": "in",
                "configModule": 3,
                "settleChannel": 3
            })
        );
    }

    #[test]
    fn response_without_products_is_empty() {
        let parsed: DetailResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(parsed.data.and_then(|d| d.products).is_none());

        let parsed: DetailResponse = serde_json::from_str(r#"{"code": 500}"#).unwrap();
        assert!(parsed.data.is_none());
    }

    #[test]
    fn null_name_and_missing_sku_do_not_drop_other_variants() {
        let parsed: DetailResponse = serde_json::from_str(
            r#"{"data":{"products":[
                {"skuCode":"A1","name":"Green 8+256"},
                {"skuCode":"B2","name":null},
                {"name":"No SKU"},
                {"skuCode":null,"name":"Null SKU"}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(
            parsed.into_variants(),
            vec![
                OppoVariant {
                    sku: "A1".to_string(),
                    name: "Green 8+256".to_string(),
                },
                OppoVariant {
                    sku: "B2".to_string(),
                    name: String::new(),
                },
            ]
        );
    }
}
