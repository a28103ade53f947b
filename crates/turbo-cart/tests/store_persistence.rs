//! Cart persistence against a real file-backed store.

use std::fs;

use tempfile::TempDir;
use turbo_cache::{Cache, FileStore};
use turbo_cart::prelude::*;

fn open(dir: &TempDir) -> CartStore<FileStore> {
    let store = FileStore::open(dir.path()).unwrap();
    CartStore::open(Cache::new(store), PricingPolicy::default())
}

fn rupees(amount: f64) -> Money {
    Money::from_decimal(amount, Currency::INR)
}

#[test]
fn test_cart_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut store = open(&dir);
        store
            .add_line(
                Product::new("headphones", "Headphones", rupees(2999.0))
                    .with_category("Audio")
                    .with_image("/img/headphones.png"),
                1,
            )
            .unwrap();
        store
            .add_line(Product::new("cable", "USB-C Cable", rupees(199.0)), 3)
            .unwrap();
        store.set_quantity(&ProductId::new("headphones"), 2);
    }

    let store = open(&dir);
    let lines = store.current_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product.id, ProductId::new("headphones"));
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[0].product.category, "Audio");
    assert_eq!(lines[1].quantity, 3);
    assert_eq!(store.summary().subtotal, rupees(6595.0));
}

#[test]
fn test_file_is_versioned_envelope() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store
        .add_line(Product::new("mug", "Coffee Mug", rupees(500.0)), 2)
        .unwrap();

    let path = FileStore::open(dir.path()).unwrap().path_for(DEFAULT_CART_KEY);
    let value: serde_json::Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();

    assert_eq!(value["version"], 1);
    assert_eq!(value["lines"][0]["quantity"], 2);
    assert_eq!(value["lines"][0]["product"]["id"], "mug");
}

#[test]
fn test_clear_persists_empty_cart() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        store
            .add_line(Product::new("mug", "Coffee Mug", rupees(500.0)), 2)
            .unwrap();
        store.clear();
    }

    let store = open(&dir);
    assert!(store.is_empty());
    assert_eq!(store.summary(), OrderSummary::zero(Currency::INR));
}

#[test]
fn test_legacy_file_is_migrated_on_next_write() {
    let dir = TempDir::new().unwrap();
    let path = FileStore::open(dir.path()).unwrap().path_for(DEFAULT_CART_KEY);
    fs::write(
        &path,
        r#"[{"product": {"id": 7, "name": "Desk Lamp", "price": 899.99}, "quantity": 1}]"#,
    )
    .unwrap();

    let mut store = open(&dir);
    assert_eq!(store.line_count(), 1);
    assert_eq!(store.current_lines()[0].product.price, rupees(899.99));

    assert!(store.increment(&ProductId::new("7")));

    let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["lines"][0]["quantity"], 2);
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = FileStore::open(dir.path()).unwrap().path_for(DEFAULT_CART_KEY);
    fs::write(&path, "{ this is not json").unwrap();

    let mut store = open(&dir);
    assert!(store.is_empty());

    store
        .add_line(Product::new("mug", "Coffee Mug", rupees(500.0)), 1)
        .unwrap();
    assert_eq!(open(&dir).line_count(), 1);
}

#[test]
fn test_future_schema_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = FileStore::open(dir.path()).unwrap().path_for(DEFAULT_CART_KEY);
    fs::write(&path, r#"{"version": 42, "lines": []}"#).unwrap();

    assert!(open(&dir).is_empty());
}

#[test]
fn test_write_failure_keeps_in_memory_cart() {
    let dir = TempDir::new().unwrap();
    let store_dir = dir.path().join("state");
    let file_store = FileStore::open(&store_dir).unwrap();
    let mut store = CartStore::open(Cache::new(file_store), PricingPolicy::default());

    // Removing the directory makes every later write fail.
    fs::remove_dir_all(&store_dir).unwrap();

    store
        .add_line(Product::new("mug", "Coffee Mug", rupees(500.0)), 2)
        .unwrap();

    assert_eq!(store.item_count(), 2);
    assert!(store.persist_status().is_failed());
}

#[test]
fn test_separate_keys_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let cache = || Cache::new(FileStore::open(dir.path()).unwrap());

    let mut a = CartStore::open_at(cache(), "cart:alice", PricingPolicy::default());
    let mut b = CartStore::open_at(cache(), "cart:bob", PricingPolicy::default());
    a.add_line(Product::new("mug", "Coffee Mug", rupees(500.0)), 1)
        .unwrap();
    b.add_line(Product::new("pen", "Pen", rupees(20.0)), 5)
        .unwrap();

    let a = CartStore::open_at(cache(), "cart:alice", PricingPolicy::default());
    let b = CartStore::open_at(cache(), "cart:bob", PricingPolicy::default());
    assert_eq!(a.item_count(), 1);
    assert_eq!(b.item_count(), 5);
}

#[test]
fn test_keys_differing_only_in_punctuation_stay_separate() {
    let dir = TempDir::new().unwrap();
    let cache = || Cache::new(FileStore::open(dir.path()).unwrap());

    let pairs = [("cart:alice", "cart_alice"), ("cart:a/b", "cart:a:b")];
    for (first, second) in pairs {
        let mut a = CartStore::open_at(cache(), first, PricingPolicy::default());
        a.add_line(Product::new("mug", "Coffee Mug", rupees(500.0)), 2)
            .unwrap();

        let b = CartStore::open_at(cache(), second, PricingPolicy::default());
        assert!(b.is_empty(), "{second} sees the cart stored under {first}");
    }
}

#[test]
fn test_currency_change_does_not_lose_stored_lines() {
    let dir = TempDir::new().unwrap();
    let cache = || Cache::new(FileStore::open(dir.path()).unwrap());

    let mut inr = CartStore::open(cache(), PricingPolicy::default());
    inr.add_line(Product::new("mug", "Coffee Mug", rupees(500.0)), 2)
        .unwrap();

    let mut usd = CartStore::open(cache(), PricingPolicy::new(Currency::USD));
    assert!(usd.is_empty());
    usd.add_line(
        Product::new("pen", "Pen", Money::from_decimal(1.5, Currency::USD)),
        1,
    )
    .unwrap();

    let inr = CartStore::open(cache(), PricingPolicy::default());
    assert_eq!(inr.line_count(), 1);
    assert_eq!(inr.current_lines()[0].quantity, 2);
    assert_eq!(inr.held_lines().len(), 1);
    assert_eq!(inr.held_lines()[0].product.id, ProductId::new("pen"));
}
