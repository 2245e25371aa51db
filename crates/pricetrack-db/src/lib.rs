//! Product persistence.
//!
//! Tracked products are unique on `(store_type, product_id)`. Two backends
//! implement [`ProductStore`]: [`MemoryStore`] for tests and short-lived
//! processes, and [`JsonFileStore`] for the CLI.

mod products;

pub use products::{JsonFileStore, MemoryStore, ProductStore};

use pricetrack_core::StoreType;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product {product_id} from {store_type} is already tracked")]
    Duplicate {
        store_type: StoreType,
        product_id: String,
    },
    #[error("product {0} not found")]
    NotFound(Uuid),
    #[error("store file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}
