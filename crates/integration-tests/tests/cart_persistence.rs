//! Integration tests for cart persistence.
//!
//! These tests drive a `CartStore` against real file storage and reload it
//! from disk, the way an app restart would.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use gomarket_cart::{CartStore, FileStorage, KeyValueStorage, StorageBackend, config};
use gomarket_core::{Cart, ProductId};
use gomarket_integration_tests::product;

const KEY: &str = config::DEFAULT_CART_KEY;

async fn open(dir: &std::path::Path) -> CartStore {
    CartStore::load(StorageBackend::from(FileStorage::new(dir)), KEY).await
}

async fn read_blob(dir: &std::path::Path) -> Option<String> {
    FileStorage::new(dir).get_item(KEY).await.unwrap()
}

// =============================================================================
// Load Tests
// =============================================================================

#[tokio::test]
async fn test_fresh_directory_loads_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(dir.path()).await;

    assert!(store.products().await.is_empty());
    assert_eq!(read_blob(dir.path()).await, None);
}

#[tokio::test]
async fn test_malformed_blobs_load_empty() {
    let malformed = [
        "not json at all",
        r#"{"id":"1"}"#,
        r#"[{"id":"1","title":"Mug","image_url":"","price":1,"quantity":0}]"#,
        r#"[{"id":"1","title":"A","image_url":"","price":1,"quantity":1},
            {"id":"1","title":"B","image_url":"","price":1,"quantity":1}]"#,
    ];

    for blob in malformed {
        let dir = tempfile::tempdir().unwrap();
        FileStorage::new(dir.path()).set_item(KEY, blob).await.unwrap();

        let store = open(dir.path()).await;
        assert!(store.products().await.is_empty(), "blob: {blob}");
    }
}

#[tokio::test]
async fn test_malformed_blob_is_replaced_on_next_mutation() {
    let dir = tempfile::tempdir().unwrap();
    FileStorage::new(dir.path()).set_item(KEY, "garbage").await.unwrap();

    let store = open(dir.path()).await;
    store.add_to_cart(product("1", "Mug", 1250)).await;

    let blob = read_blob(dir.path()).await.unwrap();
    let cart: Cart = serde_json::from_str(&blob).unwrap();
    assert_eq!(cart.len(), 1);
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[tokio::test]
async fn test_every_mutation_round_trips_through_storage() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(dir.path()).await;
    let mug = ProductId::from("1");
    let cap = ProductId::from("2");

    store.add_to_cart(product("1", "Mug", 1250)).await;
    store.add_to_cart(product("2", "Cap", 2000)).await;
    store.add_to_cart(product("1", "Mug", 1250)).await;
    store.increment(&cap).await;
    store.decrement(&mug).await;
    store.increment(&ProductId::from("unknown")).await;

    let blob = read_blob(dir.path()).await.unwrap();
    let persisted: Cart = serde_json::from_str(&blob).unwrap();
    assert_eq!(persisted, store.cart().await);
    assert_eq!(persisted.get(&mug).unwrap().quantity, 1);
    assert_eq!(persisted.get(&cap).unwrap().quantity, 2);
}

#[tokio::test]
async fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = open(dir.path()).await;
        store.add_to_cart(product("b", "Beans", 899)).await;
        store.add_to_cart(product("a", "Apron", 2450)).await;
        store.add_to_cart(product("b", "Beans", 899)).await;
    }

    let reloaded = open(dir.path()).await;
    let products = reloaded.products().await;

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(reloaded.total_quantity().await, 3);
}

#[tokio::test]
async fn test_removing_last_item_persists_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(dir.path()).await;
    let id = ProductId::from("1");

    store.add_to_cart(product("1", "Mug", 1250)).await;
    store.decrement(&id).await;

    assert_eq!(read_blob(dir.path()).await.as_deref(), Some("[]"));
    assert!(open(dir.path()).await.products().await.is_empty());
}

#[tokio::test]
async fn test_blob_written_by_other_client_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let blob = r#"[{"id":"42","title":"Granola","image_url":"https://cdn/42.png","price":6.49,"quantity":4}]"#;
    FileStorage::new(dir.path()).set_item(KEY, blob).await.unwrap();

    let store = open(dir.path()).await;
    let products = store.decrement(&ProductId::from("42")).await;
    assert_eq!(products.first().map(|p| p.quantity), Some(3));

    let json: serde_json::Value =
        serde_json::from_str(&read_blob(dir.path()).await.unwrap()).unwrap();
    assert_eq!(json[0]["price"].to_string(), "6.49");
}
