//! Reliance Digital item-code lookup.
//!
//! The numeric item code used by Reliance Digital's APIs never appears in
//! the product URL. It is printed in the specifications table of the
//! product page, and also embedded in the `og:image` file name.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::client::{extract_domain, StoreClient};
use crate::error::ScraperError;

static SPEC_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.specifications-list").expect("valid selector"));
static SPEC_LABEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span:first-child").expect("valid selector"));
static SPEC_VALUE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".specifications-list--right ul").expect("valid selector")
});
static OG_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:image"]"#).expect("valid selector"));
static OG_IMAGE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d{9})-i-1").expect("valid og:image regex"));

const ITEM_CODE_LABEL: &str = "Item Code";

impl StoreClient {
    /// Fetches a Reliance Digital product page and extracts its item code.
    ///
    /// Returns `Ok(None)` when the page loads but carries no item code,
    /// including non-2xx responses.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] on network or TLS failure, or when the
    /// body cannot be read.
    pub async fn try_fetch_item_code(&self, url: &str) -> Result<Option<String>, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                domain = %extract_domain(url),
                status = status.as_u16(),
                "product page returned non-success status"
            );
            return Ok(None);
        }

        let body = response.text().await?;
        let code = extract_item_code(&body);
        if code.is_none() {
            tracing::debug!(url, "no item code found in product page");
        }
        Ok(code)
    }

    /// Best-effort variant of [`Self::try_fetch_item_code`]: transport errors
    /// are logged and reported as `None`.
    pub async fn fetch_item_code(&self, url: &str) -> Option<String> {
        match self.try_fetch_item_code(url).await {
            Ok(code) => code,
            Err(e) => {
                tracing::warn!(url, error = %e, "item code lookup failed");
                None
            }
        }
    }
}

/// Extracts the Reliance Digital item code from product-page HTML.
///
/// Looks for the specifications row labelled exactly `Item Code` first, then
/// falls back to the 9-digit code in the `og:image` URL
/// (`.../slug-123456789-i-1.jpg`).
#[must_use]
pub fn extract_item_code(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    item_code_from_specifications(&document).or_else(|| item_code_from_og_image(&document))
}

fn item_code_from_specifications(document: &Html) -> Option<String> {
    document
        .select(&SPEC_ROW)
        .find(|row| collect_text(row, &SPEC_LABEL) == ITEM_CODE_LABEL)
        .map(|row| collect_text(&row, &SPEC_VALUE))
        .filter(|code| !code.is_empty())
}

fn item_code_from_og_image(document: &Html) -> Option<String> {
    let content = document
        .select(&OG_IMAGE)
        .find_map(|meta| meta.value().attr("content"))?;
    OG_IMAGE_CODE_RE
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Concatenated, trimmed text of every descendant of `scope` matching `selector`.
fn collect_text(scope: &ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}
