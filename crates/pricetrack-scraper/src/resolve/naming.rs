//! Display-name formatting for resolved products.

use pricetrack_core::StoreType;

/// Vivo and iQOO slugs can be long marketing strings.
pub(super) const MAX_SLUG_NAME_CHARS: usize = 50;

/// The parenthesised prefix every stored name starts with.
pub(super) fn name_prefix(store: StoreType) -> &'static str {
    match store {
        StoreType::RelianceDigital => "R. Digital",
        other => other.label(),
    }
}

/// `"(Amazon) Product Name"` from a URL slug like `"Product-Name"`.
pub(super) fn display_name(store: StoreType, slug: &str) -> String {
    format!("({}) {}", name_prefix(store), slug.replace('-', " "))
}

/// Like [`display_name`] but capitalizes each word and caps the slug length.
pub(super) fn titled_display_name(store: StoreType, slug: &str) -> String {
    let titled = title_case(&slug.replace('-', " "));
    let truncated: String = titled.chars().take(MAX_SLUG_NAME_CHARS).collect();
    format!("({}) {}", name_prefix(store), truncated.trim_end())
}

/// Uppercases the first character of every space-separated word. The rest
/// of each word is left alone so model codes like `5G` survive.
pub(super) fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
