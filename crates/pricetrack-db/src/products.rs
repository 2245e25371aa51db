//! Store operations for tracked products.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use pricetrack_core::{NewProduct, Product, StoreType};
use uuid::Uuid;

use crate::StoreError;

/// Persistence collaborator for tracked products.
pub trait ProductStore {
    /// Persists `product` with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if a product with the same store and
    /// product id is already tracked, or an I/O error from the backend.
    fn create(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Removes the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such product exists, or an I/O
    /// error from the backend.
    fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// All tracked products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an I/O or decode error from the backend.
    fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Tracked products belonging to `store_type`.
    ///
    /// # Errors
    ///
    /// See [`ProductStore::list`].
    fn list_by_store(&self, store_type: StoreType) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.store_type == store_type)
            .collect())
    }
}

/// Appends `new` to `products` unless its `(store_type, product_id)` pair is
/// already present.
fn insert_unique(products: &mut Vec<Product>, new: NewProduct) -> Result<Product, StoreError> {
    if products
        .iter()
        .any(|p| p.store_type == new.store_type && p.product_id == new.product_id)
    {
        return Err(StoreError::Duplicate {
            store_type: new.store_type,
            product_id: new.product_id,
        });
    }

    let product = Product {
        id: Uuid::new_v4(),
        name: new.name,
        url: new.url,
        product_id: new.product_id,
        store_type: new.store_type,
        part_number: new.part_number,
        affiliate_link: new.affiliate_link,
        created_at: Utc::now(),
    };
    products.push(product.clone());
    Ok(product)
}

fn remove_by_id(products: &mut Vec<Product>, id: Uuid) -> Result<(), StoreError> {
    let before = products.len();
    products.retain(|p| p.id != id);
    if products.len() == before {
        return Err(StoreError::NotFound(id));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for MemoryStore {
    fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut products = self.products.lock().map_err(|_| StoreError::Poisoned)?;
        insert_unique(&mut products, product)
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut products = self.products.lock().map_err(|_| StoreError::Poisoned)?;
        remove_by_id(&mut products, id)
    }

    fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(products.clone())
    }
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Products kept as a pretty-printed JSON array in a single file.
///
/// Every operation re-reads the file, so edits made by another process
/// between calls are picked up. Writes go to a sibling temp file and are
/// renamed into place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens (without creating) the store at `path`. A missing file reads as
    /// an empty store; parent directories are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Product>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(products)?)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            count = products.len(),
            "saved product store"
        );
        Ok(())
    }

    fn modify<T>(
        &self,
        op: impl FnOnce(&mut Vec<Product>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut products = self.load()?;
        let out = op(&mut products)?;
        self.save(&products)?;
        Ok(out)
    }
}

impl ProductStore for JsonFileStore {
    fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        self.modify(|products| insert_unique(products, product))
    }

    fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.modify(|products| remove_by_id(products, id))
    }

    fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(store_type: StoreType, product_id: &str) -> NewProduct {
        NewProduct {
            name: format!("({}) thing", store_type.label()),
            url: format!("https://example.test/{product_id}"),
            product_id: product_id.to_string(),
            store_type,
            part_number: None,
            affiliate_link: None,
        }
    }

    #[test]
    fn create_rejects_same_store_and_product_id() {
        let store = MemoryStore::new();
        store
            .create(new_product(StoreType::Croma, "300000"))
            .unwrap();
        let err = store
            .create(new_product(StoreType::Croma, "300000"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[test]
    fn same_product_id_in_different_stores_is_allowed() {
        let store = MemoryStore::new();
        store.create(new_product(StoreType::Croma, "123")).unwrap();
        store.create(new_product(StoreType::Vivo, "123")).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.delete(id), Err(StoreError::NotFound(x)) if x == id));
    }

    #[test]
    fn list_by_store_filters() {
        let store = MemoryStore::new();
        store.create(new_product(StoreType::Croma, "1")).unwrap();
        store.create(new_product(StoreType::Amazon, "B0")).unwrap();
        let croma = store.list_by_store(StoreType::Croma).unwrap();
        assert_eq!(croma.len(), 1);
        assert_eq!(croma[0].product_id, "1");
    }
}
