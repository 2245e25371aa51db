//! Form actions behind `add` and `remove`.
//!
//! Successful mutations emit an `info` event; there is no page cache to
//! invalidate in the CLI.

use pricetrack_core::{store_hint, NewProduct, Product, StoreType};
use pricetrack_db::{ProductStore, StoreError};
use pricetrack_scraper::{RemoteLookup, ResolveError, Resolver};
use thiserror::Error;
use uuid::Uuid;

/// Submitted add-product form.
#[derive(Debug, Clone, Default)]
pub(crate) struct AddForm {
    pub url: String,
    pub part_number: Option<String>,
    pub affiliate_link: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum AddProductError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Failed to add product (duplicate?)")]
    Create(#[source] StoreError),
}

/// Resolves the form URL and persists the product.
///
/// For Apple URLs without a part number, the part number embedded in the URL
/// (if any) is used.
///
/// # Errors
///
/// Returns the resolver's error unchanged, or
/// [`AddProductError::Create`] for any persistence failure.
pub(crate) async fn add_product<L, S>(
    resolver: &Resolver<L>,
    store: &S,
    form: AddForm,
) -> Result<Product, AddProductError>
where
    L: RemoteLookup,
    S: ProductStore,
{
    let affiliate_link = form
        .affiliate_link
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let mut part_number = form.part_number;
    if part_number.as_deref().is_none_or(|p| p.trim().is_empty()) {
        let hint = store_hint(&form.url);
        if hint.store_type == StoreType::Apple {
            part_number = hint.extracted_part_number;
        }
    }

    let source = resolver.resolve(&form.url, part_number.as_deref()).await?;
    let new = NewProduct::from_source(source, form.url.trim(), affiliate_link);

    let product = store.create(new).map_err(|e| {
        tracing::warn!(error = %e, "failed to add product");
        AddProductError::Create(e)
    })?;

    tracing::info!(
        id = %product.id,
        store = %product.store_type,
        product_id = %product.product_id,
        "product added"
    );
    Ok(product)
}

/// Stops tracking `id`. Failures are logged and otherwise ignored.
pub(crate) fn delete_product<S: ProductStore>(store: &S, id: Uuid) {
    match store.delete(id) {
        Ok(()) => tracing::info!(%id, "product deleted"),
        Err(e) => tracing::warn!(%id, error = %e, "failed to delete product"),
    }
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
