//! Store detection and product-identifier resolution for pasted URLs.
//!
//! Stores are matched on the URL hostname through [`STORE_RULES`], an ordered
//! table of predicates where the first match wins. Each predicate is written
//! so it stays correct on its own: the Vivo rule rejects iQOO hosts itself
//! instead of relying on iQOO being listed elsewhere.

mod naming;

use std::future::Future;
use std::sync::LazyLock;

use pricetrack_core::{OppoVariant, ProductSource, StoreType};
use regex::Regex;
use reqwest::Url;
use thiserror::Error;

use crate::client::StoreClient;
use crate::error::ScraperError;

use naming::{display_name, name_prefix, titled_display_name};

static CROMA_PID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid croma pid regex"));

/// Labels of every store in [`STORE_RULES`], in [`StoreType`] order.
static SUPPORTED_STORES: LazyLock<String> = LazyLock::new(|| {
    let mut stores: Vec<StoreType> = STORE_RULES.iter().map(|(store, _)| *store).collect();
    stores.sort_unstable();
    stores
        .iter()
        .map(|store| store.label())
        .collect::<Vec<_>>()
        .join(", ")
});

/// User-facing resolution failures. `Display` is the message shown to the
/// user as-is.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid {} URL", .0.label())]
    MissingProductSegment(StoreType),

    #[error("Could not extract Reliance Item Code")]
    ItemCodeNotFound,

    #[error("Could not extract Reliance Item Code: {0}")]
    ItemCodeLookup(#[source] ScraperError),

    #[error("Flipkart PID missing")]
    FlipkartPidMissing,

    #[error("Invalid Amazon DP URL")]
    InvalidAmazonUrl,

    #[error("Apple requires Part Number")]
    ApplePartNumberRequired,

    #[error("Invalid Croma PID")]
    InvalidCromaPid,

    #[error("Please select OPPO variant first")]
    OppoVariantRequired,

    #[error("Unsupported store URL. Supported stores: {}", SUPPORTED_STORES.as_str())]
    UnsupportedStore,
}

/// Network lookups the resolver needs for stores whose identifier is not in
/// the URL.
pub trait RemoteLookup {
    /// Reliance Digital item code for a product page. `Ok(None)` means the
    /// page had none.
    fn item_code(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Option<String>, ScraperError>> + Send;

    /// OPPO variants for a product URL; empty when unavailable.
    fn oppo_variants(&self, url: &str) -> impl Future<Output = Vec<OppoVariant>> + Send;
}

impl RemoteLookup for StoreClient {
    async fn item_code(&self, url: &str) -> Result<Option<String>, ScraperError> {
        self.try_fetch_item_code(url).await
    }

    async fn oppo_variants(&self, url: &str) -> Vec<OppoVariant> {
        self.fetch_oppo_variants(url).await
    }
}

type HostPredicate = fn(&str) -> bool;

fn is_vivo(host: &str) -> bool {
    host.contains("vivo.com") && !host.contains("iqoo.com")
}

fn is_iqoo(host: &str) -> bool {
    host.contains("iqoo.com")
}

fn is_reliance_digital(host: &str) -> bool {
    host.contains("reliancedigital.in")
}

fn is_flipkart(host: &str) -> bool {
    host.contains("flipkart.com")
}

fn is_amazon(host: &str) -> bool {
    host.contains("amazon.in")
}

fn is_apple(host: &str) -> bool {
    host.contains("apple.com")
}

fn is_croma(host: &str) -> bool {
    host.contains("croma.com")
}

fn is_oppo(host: &str) -> bool {
    host.contains("oppo.com")
}

/// Store dispatch table, in priority order. Hosts are lowercased before
/// matching.
pub const STORE_RULES: &[(StoreType, HostPredicate)] = &[
    (StoreType::Vivo, is_vivo),
    (StoreType::Iqoo, is_iqoo),
    (StoreType::RelianceDigital, is_reliance_digital),
    (StoreType::Flipkart, is_flipkart),
    (StoreType::Amazon, is_amazon),
    (StoreType::Apple, is_apple),
    (StoreType::Croma, is_croma),
    (StoreType::Oppo, is_oppo),
];

/// Picks the store for `host`, or [`StoreType::Unknown`] when no rule matches.
#[must_use]
pub fn detect_store(host: &str) -> StoreType {
    let host = host.to_ascii_lowercase();
    STORE_RULES
        .iter()
        .find(|(_, matches)| matches(host.as_str()))
        .map_or(StoreType::Unknown, |(store, _)| *store)
}

/// Turns a pasted product URL into a [`ProductSource`].
///
/// Holds no state between calls; the same input against the same remote
/// state always resolves the same way.
pub struct Resolver<L = StoreClient> {
    lookup: L,
}

impl<L: RemoteLookup> Resolver<L> {
    #[must_use]
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    #[must_use]
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolves `url`, using `part_number` for stores that need a
    /// caller-supplied identifier (Apple part number, OPPO SKU). A blank
    /// part number counts as missing.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] describing why no identifier could be
    /// derived. Nothing is retried.
    pub async fn resolve(
        &self,
        url: &str,
        part_number: Option<&str>,
    ) -> Result<ProductSource, ResolveError> {
        let result = self.resolve_inner(url, part_number).await;
        match &result {
            Ok(source) => tracing::info!(
                store = %source.store_type,
                product_id = %source.product_id,
                "resolved product URL"
            ),
            Err(e) => tracing::debug!(url, error = %e, "could not resolve product URL"),
        }
        result
    }

    async fn resolve_inner(
        &self,
        url: &str,
        part_number: Option<&str>,
    ) -> Result<ProductSource, ResolveError> {
        let parsed = Url::parse(url.trim()).map_err(|e| ResolveError::InvalidUrl(e.to_string()))?;
        let host = parsed.host_str().unwrap_or_default();
        let part_number = part_number.map(str::trim).filter(|p| !p.is_empty());

        match detect_store(host) {
            store @ (StoreType::Vivo | StoreType::Iqoo) => resolve_from_last_segment(store, &parsed),
            StoreType::RelianceDigital => self.resolve_reliance(url.trim(), &parsed).await,
            StoreType::Flipkart => resolve_flipkart(&parsed),
            StoreType::Amazon => resolve_amazon(&parsed),
            StoreType::Apple => resolve_apple(&parsed, part_number),
            StoreType::Croma => resolve_croma(&parsed),
            StoreType::Oppo => self.resolve_oppo(url.trim(), part_number).await,
            StoreType::Jiomart | StoreType::Unknown => Err(ResolveError::UnsupportedStore),
        }
    }

    async fn resolve_reliance(
        &self,
        url: &str,
        parsed: &Url,
    ) -> Result<ProductSource, ResolveError> {
        let item_code = self
            .lookup
            .item_code(url)
            .await
            .map_err(ResolveError::ItemCodeLookup)?
            .ok_or(ResolveError::ItemCodeNotFound)?;

        let segments = non_empty_segments(parsed);
        let slug = segments.last().map(|s| (*s).to_string());
        let base = segments
            .len()
            .checked_sub(2)
            .and_then(|i| segments.get(i))
            .copied()
            .unwrap_or("RD Product");

        Ok(ProductSource {
            name: display_name(StoreType::RelianceDigital, base),
            product_id: item_code,
            store_type: StoreType::RelianceDigital,
            part_number: slug,
        })
    }

    async fn resolve_oppo(
        &self,
        url: &str,
        part_number: Option<&str>,
    ) -> Result<ProductSource, ResolveError> {
        let sku = part_number.ok_or(ResolveError::OppoVariantRequired)?;

        let variant_name = self
            .lookup
            .oppo_variants(url)
            .await
            .into_iter()
            .find(|v| v.sku == sku)
            .map(|v| v.name.trim().to_string())
            .filter(|n| !n.is_empty());
        if variant_name.is_none() {
            tracing::debug!(sku, "SKU not in OPPO variant list; using placeholder name");
        }
        let label = variant_name.unwrap_or_else(|| "Product".to_string());

        Ok(ProductSource {
            name: format!("({}) {label}", name_prefix(StoreType::Oppo)),
            product_id: sku.to_string(),
            store_type: StoreType::Oppo,
            part_number: Some(sku.to_string()),
        })
    }
}

/// Path segments with empty entries (leading, trailing, doubled slashes) removed.
fn non_empty_segments(url: &Url) -> Vec<&str> {
    url.path().split('/').filter(|s| !s.is_empty()).collect()
}

/// Raw `/`-split of the path, keeping the leading empty entry so indices
/// line up with `pathname.split("/")`.
fn raw_segments(url: &Url) -> Vec<&str> {
    url.path().split('/').collect()
}

fn non_empty<'a>(segment: Option<&&'a str>) -> Option<&'a str> {
    segment.copied().filter(|s| !s.is_empty())
}

/// Vivo and iQOO: the product id is the last segment and the slug before it
/// names the product.
fn resolve_from_last_segment(store: StoreType, url: &Url) -> Result<ProductSource, ResolveError> {
    let mut segments = non_empty_segments(url);
    let product_id = segments
        .pop()
        .ok_or(ResolveError::MissingProductSegment(store))?;
    let fallback = format!("{} Product", store.label());
    let base = segments.pop().map_or(fallback, str::to_string);

    Ok(ProductSource {
        name: titled_display_name(store, &base),
        product_id: product_id.to_string(),
        store_type: store,
        part_number: None,
    })
}

fn resolve_flipkart(url: &Url) -> Result<ProductSource, ResolveError> {
    let pid = url
        .query_pairs()
        .find(|(key, _)| key == "pid")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ResolveError::FlipkartPidMissing)?;

    let segments = raw_segments(url);
    let slug = non_empty(segments.get(1)).unwrap_or("Flipkart Product");

    Ok(ProductSource {
        name: display_name(StoreType::Flipkart, slug),
        product_id: pid,
        store_type: StoreType::Flipkart,
        part_number: None,
    })
}

fn resolve_amazon(url: &Url) -> Result<ProductSource, ResolveError> {
    let segments = raw_segments(url);
    let dp = segments
        .iter()
        .position(|s| *s == "dp")
        .ok_or(ResolveError::InvalidAmazonUrl)?;
    let asin = non_empty(segments.get(dp + 1)).ok_or(ResolveError::InvalidAmazonUrl)?;
    let slug = dp
        .checked_sub(1)
        .and_then(|i| non_empty(segments.get(i)))
        .unwrap_or("Amazon Product");

    Ok(ProductSource {
        name: display_name(StoreType::Amazon, slug),
        product_id: asin.to_string(),
        store_type: StoreType::Amazon,
        part_number: None,
    })
}

fn resolve_apple(url: &Url, part_number: Option<&str>) -> Result<ProductSource, ResolveError> {
    let part_number = part_number.ok_or(ResolveError::ApplePartNumberRequired)?;
    let segments = raw_segments(url);
    let title = non_empty(segments.get(3)).unwrap_or("Apple Product");

    Ok(ProductSource {
        name: display_name(StoreType::Apple, title),
        product_id: part_number.to_string(),
        store_type: StoreType::Apple,
        part_number: Some(part_number.to_string()),
    })
}

fn resolve_croma(url: &Url) -> Result<ProductSource, ResolveError> {
    let mut segments = raw_segments(url);
    let pid = segments.pop().unwrap_or_default();
    if !CROMA_PID_RE.is_match(pid) {
        return Err(ResolveError::InvalidCromaPid);
    }
    let slug = non_empty(segments.get(1)).unwrap_or("Croma Product");

    Ok(ProductSource {
        name: display_name(StoreType::Croma, slug),
        product_id: pid.to_string(),
        store_type: StoreType::Croma,
        part_number: None,
    })
}

#[cfg(test)]
#[path = "../resolve_test.rs"]
mod tests;
