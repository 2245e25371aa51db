//! File-backed store tests. Each test works in its own temp directory.

use pricetrack_core::{NewProduct, StoreType};
use pricetrack_db::{JsonFileStore, ProductStore, StoreError};

fn apple_product() -> NewProduct {
    NewProduct {
        name: "(Apple) buy iphone".to_string(),
        url: "https://www.apple.com/in/shop/buy-iphone/iphone-16".to_string(),
        product_id: "MG6P4HN/A".to_string(),
        store_type: StoreType::Apple,
        part_number: Some("MG6P4HN/A".to_string()),
        affiliate_link: Some("https://aff.example/apple".to_string()),
    }
}

#[test]
fn missing_file_reads_as_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("products.json"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn created_products_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("products.json");

    let created = JsonFileStore::new(&path).create(apple_product()).unwrap();

    let reopened = JsonFileStore::new(&path);
    let products = reopened.list().unwrap();
    assert_eq!(products, vec![created]);
    assert_eq!(products[0].store_type, StoreType::Apple);
    assert_eq!(products[0].part_number.as_deref(), Some("MG6P4HN/A"));
}

#[test]
fn duplicate_is_rejected_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");

    JsonFileStore::new(&path).create(apple_product()).unwrap();
    let err = JsonFileStore::new(&path)
        .create(apple_product())
        .unwrap_err();

    assert!(
        matches!(err, StoreError::Duplicate { store_type: StoreType::Apple, .. }),
        "expected Duplicate, got: {err:?}"
    );
    assert_eq!(JsonFileStore::new(&path).list().unwrap().len(), 1);
}

#[test]
fn delete_removes_product_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("products.json"));

    let product = store.create(apple_product()).unwrap();
    store.delete(product.id).unwrap();

    assert!(store.list().unwrap().is_empty());
    assert!(matches!(
        store.delete(product.id),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn file_uses_camel_case_snake_store_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    JsonFileStore::new(&path)
        .create(NewProduct {
            store_type: StoreType::RelianceDigital,
            product_id: "493839312".to_string(),
            ..apple_product()
        })
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"storeType\": \"reliance_digital\""));
    assert!(raw.contains("\"productId\": \"493839312\""));
}

#[test]
fn path_is_the_file_written() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested").join("products.json"));
    store.create(apple_product()).unwrap();

    assert!(store.path().ends_with("nested/products.json"));
    assert!(store.path().is_file());
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = JsonFileStore::new(&path).list().unwrap_err();
    assert!(matches!(err, StoreError::Json(_)), "got: {err:?}");
}
