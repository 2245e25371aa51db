//! Croma availability check against the inventory promise API.

use serde::Serialize;
use serde_json::Value;

use crate::client::StoreClient;
use crate::error::ScraperError;

const SUBSCRIPTION_KEY_HEADER: &str = "oms-apim-subscription-key";

#[derive(Debug, Serialize)]
struct PromiseRequest<'a> {
    promise: Promise<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Promise<'a> {
    #[serde(rename = "allocationRuleID")]
    allocation_rule_id: &'a str,
    check_inventory: &'a str,
    organization_code: &'a str,
    sourcing_classification: &'a str,
    promise_lines: PromiseLines<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromiseLines<'a> {
    promise_line: [PromiseLine<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromiseLine<'a> {
    fulfillment_type: &'a str,
    #[serde(rename = "itemID")]
    item_id: &'a str,
    line_id: &'a str,
    required_qty: &'a str,
    ship_to_address: ShipToAddress<'a>,
    extn: Extn<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShipToAddress<'a> {
    zip_code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Extn<'a> {
    wider_store_flag: &'a str,
}

impl<'a> PromiseRequest<'a> {
    /// Home delivery of one unit of `item_id` to `pincode`.
    fn home_delivery(item_id: &'a str, pincode: &'a str) -> Self {
        Self {
            promise: Promise {
                allocation_rule_id: "SYSTEM",
                check_inventory: "Y",
                organization_code: "CROMA",
                sourcing_classification: "EC",
                promise_lines: PromiseLines {
                    promise_line: [PromiseLine {
                        fulfillment_type: "HDEL",
                        item_id,
                        line_id: "1",
                        required_qty: "1",
                        ship_to_address: ShipToAddress { zip_code: pincode },
                        extn: Extn {
                            wider_store_flag: "N",
                        },
                    }],
                },
            },
        }
    }
}

impl StoreClient {
    /// Asks Croma whether `product_id` can be delivered to `pincode`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::MissingConfig`] if no subscription key is configured.
    /// - [`ScraperError::Http`] on network failure.
    /// - [`ScraperError::UnexpectedStatus`] for a non-2xx response.
    /// - [`ScraperError::Deserialize`] if the body is not JSON.
    pub async fn check_croma_stock(
        &self,
        product_id: &str,
        pincode: &str,
    ) -> Result<bool, ScraperError> {
        let key = self
            .croma_subscription_key
            .as_deref()
            .ok_or(ScraperError::MissingConfig("CROMA_SUBSCRIPTION_KEY"))?;

        let endpoint = self.croma_inventory_url.as_str();
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::ORIGIN, "https://www.croma.com")
            .header(reqwest::header::REFERER, "https://www.croma.com/")
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .json(&PromiseRequest::home_delivery(product_id, pincode))
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
        let value: Value =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("Croma promise for item {product_id}"),
                source: e,
            })?;

        let in_stock = has_promise_line(&value);
        tracing::debug!(product_id, pincode, in_stock, "Croma availability checked");
        Ok(in_stock)
    }
}

/// `true` when the suggested option carries at least one fulfillable line.
fn has_promise_line(body: &Value) -> bool {
    match body.pointer("/promise/suggestedOption/option/promiseLines/promiseLine") {
        Some(Value::Array(lines)) => !lines.is_empty(),
        Some(Value::Object(line)) => !line.is_empty(),
        _ => false,
    }
}
