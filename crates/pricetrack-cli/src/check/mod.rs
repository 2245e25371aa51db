//! `check` command: availability of tracked products and the Telegram alert.
//!
//! Per-product failures are logged and skipped so one bad product does not
//! abort the run.

mod telegram;

use pricetrack_core::{AppConfig, Product, StoreType};
use pricetrack_db::ProductStore;
use pricetrack_scraper::{ScraperError, StoreClient};

pub(crate) use telegram::TelegramNotifier;

const ALERT_HEADER: &str = "🔥 *Stock Alert!*\n\n";

/// Checks every tracked product and sends one combined alert for those in
/// stock. With `dry_run` the alert is printed instead of sent.
///
/// # Errors
///
/// Returns an error if the product store cannot be read or the Telegram
/// client cannot be built. Individual stock checks and chat sends never fail
/// the run.
pub(crate) async fn run_check<S: ProductStore>(
    config: &AppConfig,
    store: &S,
    client: &StoreClient,
    dry_run: bool,
) -> anyhow::Result<()> {
    let products = store.list()?;
    tracing::info!(count = products.len(), "checking tracked products");

    let messages = collect_alerts(client, &products, &config.pincodes).await;
    let Some(alert) = stock_alert(&messages) else {
        tracing::info!("nothing in stock");
        return Ok(());
    };

    if dry_run {
        println!("{alert}");
        return Ok(());
    }

    let Some(token) = config.telegram_bot_token.as_deref() else {
        tracing::warn!(
            alerts = messages.len(),
            "TELEGRAM_BOT_TOKEN not set; skipping stock alert"
        );
        return Ok(());
    };

    let notifier = TelegramNotifier::new(token, config.scraper_request_timeout_secs)?;
    let sent = notifier.broadcast(&config.telegram_chat_ids, &alert).await;
    tracing::info!(
        sent,
        chats = config.telegram_chat_ids.len(),
        alerts = messages.len(),
        "stock alert sent"
    );
    Ok(())
}

/// One alert line per in-stock product, in product order.
pub(crate) async fn collect_alerts(
    client: &StoreClient,
    products: &[Product],
    pincodes: &[String],
) -> Vec<String> {
    let mut messages = Vec::new();
    for product in products {
        match product.store_type {
            StoreType::Croma => {
                if let Some(message) = check_croma(client, product, pincodes).await {
                    messages.push(message);
                }
            }
            StoreType::Amazon => tracing::warn!(
                product_id = %product.product_id,
                "skipping Amazon product; PA-API availability is not supported"
            ),
            other => tracing::debug!(
                store = %other,
                product_id = %product.product_id,
                "no availability check for store"
            ),
        }
    }
    messages
}

/// Tries `pincodes` in order and reports the first one with stock.
async fn check_croma(client: &StoreClient, product: &Product, pincodes: &[String]) -> Option<String> {
    for pincode in pincodes {
        match client.check_croma_stock(&product.product_id, pincode).await {
            Ok(true) => {
                return Some(format!(
                    "✅ *In Stock at Croma ({pincode})*\n[{}]({})",
                    product.name,
                    product.share_link()
                ));
            }
            Ok(false) => {}
            Err(ScraperError::MissingConfig(var)) => {
                tracing::warn!(var, "skipping Croma check; not configured");
                return None;
            }
            Err(e) => tracing::warn!(
                product_id = %product.product_id,
                pincode = %pincode,
                error = %e,
                "Croma stock check failed"
            ),
        }
    }
    None
}

/// The combined alert text, or `None` when there is nothing to report.
pub(crate) fn stock_alert(messages: &[String]) -> Option<String> {
    if messages.is_empty() {
        return None;
    }
    Some(format!("{ALERT_HEADER}{}", messages.join("\n\n")))
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
