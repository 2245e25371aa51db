//! Store detection for the add-product form.
//!
//! Everything here is a pure function of the URL text, recomputed on every
//! change. Nothing is cached between calls.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::products::StoreType;

static APPLE_PART_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/product/(?:([A-Z0-9]+/[A-Z])(?:[/?#]|$)|([^/?#]+))")
        .expect("valid apple part regex")
});

/// What the form should show for the URL currently typed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHint {
    pub store_type: StoreType,
    /// The store needs a manually entered part number or product id.
    pub show_part_number: bool,
    /// The store needs a variant picked from the OPPO catalog lookup.
    pub needs_variant: bool,
    /// Part number read straight off the URL, used to pre-fill the field.
    pub extracted_part_number: Option<String>,
}

impl StoreHint {
    fn plain(store_type: StoreType) -> Self {
        Self {
            store_type,
            show_part_number: false,
            needs_variant: false,
            extracted_part_number: None,
        }
    }

    /// Placeholder text for the URL input.
    #[must_use]
    pub fn placeholder(&self) -> String {
        if self.store_type == StoreType::Unknown {
            "Paste Product URL (e.g., Flipkart, Amazon, Reliance Digital, Vivo, iQOO)".to_string()
        } else {
            format!("Paste {} URL", self.store_type.label().to_uppercase())
        }
    }
}

/// Derives the form hint for `url`.
///
/// Matching is a case-insensitive substring test over the whole URL. iQOO is
/// checked before Vivo so `iqoo.com` links never light up the Vivo form.
#[must_use]
pub fn store_hint(url: &str) -> StoreHint {
    let lower = url.to_lowercase();

    if lower.contains("apple.com") {
        return StoreHint {
            store_type: StoreType::Apple,
            show_part_number: true,
            needs_variant: false,
            extracted_part_number: extract_apple_part_number(url),
        };
    }
    if lower.contains("reliancedigital.in") {
        return StoreHint::plain(StoreType::RelianceDigital);
    }
    if lower.contains("iqoo.com") {
        return StoreHint::plain(StoreType::Iqoo);
    }
    if lower.contains("vivo.com") {
        return StoreHint::plain(StoreType::Vivo);
    }
    if lower.contains("oppo.com") {
        return StoreHint {
            needs_variant: true,
            ..StoreHint::plain(StoreType::Oppo)
        };
    }
    if lower.contains("jiomart.com") {
        return StoreHint::plain(StoreType::Jiomart);
    }

    for (needle, store_type) in [
        ("croma.com", StoreType::Croma),
        ("flipkart.com", StoreType::Flipkart),
        ("amazon.in", StoreType::Amazon),
    ] {
        if lower.contains(needle) {
            return StoreHint {
                show_part_number: true,
                ..StoreHint::plain(store_type)
            };
        }
    }

    StoreHint::plain(StoreType::Unknown)
}

/// Reads an Apple part number from a `/product/<part>` URL segment.
///
/// Part numbers look like `MG6P4HN/A`, so the region suffix after the slash
/// is kept when present. The suffix is a single letter ending the segment;
/// otherwise only the first segment is the part number. Case is preserved.
#[must_use]
pub fn extract_apple_part_number(url: &str) -> Option<String> {
    APPLE_PART_RE
        .captures(url)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
}
