use async_trait::async_trait;
use product_search_sync::error::{ClientError, ClientResult};
use product_search_sync::models::Product;
use product_search_sync::repositories::ProductRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock product store for testing.
///
/// Enforces a batch limit like the real store, records every batch it is asked
/// for, and answers in reverse request order. Per-call delays let tests make
/// later chunks finish before earlier ones.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockProductRepository {
    products: Arc<Mutex<HashMap<String, Product>>>,
    max_batch_size: usize,
    batches: Arc<Mutex<Vec<Vec<String>>>>,
    calls: Arc<AtomicUsize>,
    delays_ms: Arc<Mutex<Vec<u64>>>,
    fail_on_call: Arc<Mutex<Option<usize>>>,
}

#[allow(dead_code)]
impl MockProductRepository {
    /// Create a new empty store with the given batch limit.
    pub fn new(max_batch_size: usize) -> Self {
        Self {
            products: Arc::new(Mutex::new(HashMap::new())),
            max_batch_size,
            batches: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            delays_ms: Arc::new(Mutex::new(Vec::new())),
            fail_on_call: Arc::new(Mutex::new(None)),
        }
    }

    /// Store a product, replacing any with the same id.
    pub fn put(&self, product: Product) {
        let mut products = self.products.lock().unwrap();
        products.insert(product.id.clone(), product);
    }

    /// Store several products.
    pub fn put_all(&self, list: Vec<Product>) {
        for product in list {
            self.put(product);
        }
    }

    /// Remove a product, leaving any index entry for it stale.
    pub fn remove(&self, id: &str) {
        self.products.lock().unwrap().remove(id);
    }

    /// Sleep this long on the nth call (by call order).
    pub fn set_delays_ms(&self, delays: Vec<u64>) {
        *self.delays_ms.lock().unwrap() = delays;
    }

    /// Fail the nth call (zero-based) with a transport error.
    pub fn fail_on_call(&self, call: usize) {
        *self.fail_on_call.lock().unwrap() = Some(call);
    }

    /// Every batch requested so far, in call order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }

    /// Number of get_by_ids calls.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn get_by_ids(&self, ids: &[String]) -> ClientResult<Vec<Product>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(ids.to_vec());

        if ids.len() > self.max_batch_size {
            return Err(ClientError::InvalidRequest(format!(
                "Batch of {} ids exceeds the limit of {}",
                ids.len(),
                self.max_batch_size
            )));
        }

        let delay = self.delays_ms.lock().unwrap().get(call).copied();
        if let Some(ms) = delay {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        if *self.fail_on_call.lock().unwrap() == Some(call) {
            return Err(ClientError::Timeout);
        }

        let products = self.products.lock().unwrap();
        Ok(ids
            .iter()
            .rev()
            .filter_map(|id| products.get(id).cloned())
            .collect())
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}
