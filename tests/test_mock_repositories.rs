mod mocks;

use mocks::{MockIndexRepository, MockProductRepository};
use product_search_sync::models::{IndexEntry, Product};
use product_search_sync::repositories::{ProductRepository, SearchIndexRepository};

fn entry(id: &str, title: &str) -> IndexEntry {
    IndexEntry {
        object_id: id.to_string(),
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_mock_index_upsert_is_last_write_wins() {
    let index = MockIndexRepository::new();
    index.upsert(&entry("p1", "Red Shoes")).await.unwrap();
    index.upsert(&entry("p1", "Blue Shoes")).await.unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.entry("p1").unwrap().title.as_deref(), Some("Blue Shoes"));
    assert_eq!(index.get_call_count("upsert"), 2);
}

#[tokio::test]
async fn test_mock_index_search_requires_every_token() {
    let index = MockIndexRepository::new();
    index.upsert(&entry("p1", "Red Shoes")).await.unwrap();
    index.upsert(&entry("p2", "Blue Shoes")).await.unwrap();

    assert_eq!(index.search("shoes").await.unwrap(), vec!["p1", "p2"]);
    assert_eq!(index.search("red shoes").await.unwrap(), vec!["p1"]);
    assert!(index.search("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mock_index_failure_switch() {
    let index = MockIndexRepository::new();
    index.set_failing(true);

    assert!(index.upsert(&entry("p1", "Red Shoes")).await.is_err());
    assert_eq!(index.len(), 0);
}

#[tokio::test]
async fn test_mock_store_enforces_batch_limit() {
    let store = MockProductRepository::new(2);
    let ids: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

    assert!(store.get_by_ids(&ids).await.is_err());
    assert_eq!(store.max_batch_size(), 2);
}

#[tokio::test]
async fn test_mock_store_answers_in_reverse_and_omits_missing() {
    let store = MockProductRepository::new(10);
    store.put(Product::new("a", "ay"));
    store.put(Product::new("b", "bee"));

    let ids: Vec<String> = ["a", "missing", "b"].iter().map(|s| s.to_string()).collect();
    let products = store.get_by_ids(&ids).await.unwrap();
    let got: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();

    assert_eq!(got, vec!["b", "a"]);
    assert_eq!(store.batches(), vec![ids]);
}
