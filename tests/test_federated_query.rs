//! Integration tests for the federated query executor.

mod mocks;

use mocks::{MockIndexRepository, MockProductRepository};
use product_search_sync::models::Product;
use product_search_sync::repositories::{ProductRepository, SearchIndexRepository};
use product_search_sync::services::{FederatedQueryExecutor, QueryService};
use product_search_sync::ServiceError;
use std::sync::Arc;

fn executor(
    index: &MockIndexRepository,
    store: &MockProductRepository,
    concurrency: usize,
) -> FederatedQueryExecutor {
    FederatedQueryExecutor::new(
        Arc::new(index.clone()) as Arc<dyn SearchIndexRepository>,
        Arc::new(store.clone()) as Arc<dyn ProductRepository>,
        concurrency,
    )
}

fn result_ids(results: &[Product]) -> Vec<&str> {
    results.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn test_results_follow_index_rank() {
    let index = MockIndexRepository::new();
    index.script_hits(&["id2", "id1", "id3"]);
    let store = MockProductRepository::new(10);
    store.put_all(vec![
        Product::new("id1", "one"),
        Product::new("id2", "two"),
        Product::new("id3", "three"),
    ]);

    let response = executor(&index, &store, 4).search("anything").await.unwrap();

    assert_eq!(result_ids(&response.results), vec!["id2", "id1", "id3"]);
    assert_eq!(response.candidate_count, 3);
    assert_eq!(response.stale_dropped, 0);
    assert_eq!(response.chunks_fetched, 1);
}

#[tokio::test]
async fn test_stale_ids_are_dropped_silently() {
    let index = MockIndexRepository::new();
    index.script_hits(&["a", "deleted", "b"]);
    let store = MockProductRepository::new(10);
    store.put_all(vec![Product::new("a", "ay"), Product::new("b", "bee")]);

    let response = executor(&index, &store, 4).search("q").await.unwrap();

    assert_eq!(result_ids(&response.results), vec!["a", "b"]);
    assert_eq!(response.stale_dropped, 1);
}

#[tokio::test]
async fn test_all_stale_yields_empty_result() {
    let index = MockIndexRepository::new();
    index.script_hits(&["x", "y"]);
    let store = MockProductRepository::new(10);

    let response = executor(&index, &store, 4).search("q").await.unwrap();

    assert!(response.results.is_empty());
    assert_eq!(response.stale_dropped, 2);
}

#[tokio::test]
async fn test_no_hits_skips_store() {
    let index = MockIndexRepository::new();
    let store = MockProductRepository::new(10);

    let response = executor(&index, &store, 4).search("nothing").await.unwrap();

    assert!(response.results.is_empty());
    assert_eq!(response.chunks_fetched, 0);
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_duplicate_hits_keep_first_rank() {
    let index = MockIndexRepository::new();
    index.script_hits(&["b", "a", "b"]);
    let store = MockProductRepository::new(10);
    store.put_all(vec![Product::new("a", "ay"), Product::new("b", "bee")]);

    let response = executor(&index, &store, 4).search("q").await.unwrap();

    assert_eq!(result_ids(&response.results), vec!["b", "a"]);
    assert_eq!(store.batches(), vec![vec!["b".to_string(), "a".to_string()]]);
}

#[tokio::test]
async fn test_candidates_are_chunked_to_batch_limit() {
    let ids: Vec<String> = (0..25).map(|i| format!("p{:02}", i)).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let index = MockIndexRepository::new();
    index.script_hits(&id_refs);
    let store = MockProductRepository::new(10);
    store.put_all(ids.iter().map(|id| Product::new(id.clone(), "item")).collect());

    let response = executor(&index, &store, 4).search("item").await.unwrap();

    assert_eq!(result_ids(&response.results), id_refs);
    assert_eq!(response.chunks_fetched, 3);

    let mut sizes: Vec<usize> = store.batches().iter().map(Vec::len).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![5, 10, 10]);
}

#[tokio::test]
async fn test_out_of_order_chunk_completion_keeps_rank() {
    let index = MockIndexRepository::new();
    index.script_hits(&["a", "b", "c", "d", "e"]);
    let store = MockProductRepository::new(2);
    store.put_all(
        ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| Product::new(*id, "item"))
            .collect(),
    );
    // First chunk finishes last
    store.set_delays_ms(vec![60, 20, 0]);

    let response = executor(&index, &store, 3).search("item").await.unwrap();

    assert_eq!(result_ids(&response.results), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(response.chunks_fetched, 3);
}

#[tokio::test]
async fn test_index_failure_fails_query() {
    let index = MockIndexRepository::new();
    index.set_failing(true);
    let store = MockProductRepository::new(10);

    let err = executor(&index, &store, 4).search("q").await.unwrap_err();

    assert!(matches!(err, ServiceError::IndexUnavailable(_)));
    assert!(err.is_retryable());
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_any_chunk_failure_fails_whole_query() {
    let index = MockIndexRepository::new();
    index.script_hits(&["a", "b", "c", "d"]);
    let store = MockProductRepository::new(2);
    store.put_all(vec![
        Product::new("a", "ay"),
        Product::new("b", "bee"),
        Product::new("c", "see"),
        Product::new("d", "dee"),
    ]);
    store.fail_on_call(1);

    let err = executor(&index, &store, 1).search("q").await.unwrap_err();

    assert!(matches!(err, ServiceError::StoreUnavailable(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_products_are_returned_as_stored() {
    let index = MockIndexRepository::new();
    index.script_hits(&["p1"]);
    let store = MockProductRepository::new(10);
    let mut product = Product::new("p1", "Red Shoes").with_cost(20);
    product
        .extra
        .insert("supplier".to_string(), serde_json::json!("acme"));
    store.put(product.clone());

    let response = executor(&index, &store, 4).search("red").await.unwrap();

    assert_eq!(response.results, vec![product]);
}
