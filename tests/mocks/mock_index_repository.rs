use async_trait::async_trait;
use product_search_sync::error::{ClientError, ClientResult};
use product_search_sync::models::IndexEntry;
use product_search_sync::repositories::SearchIndexRepository;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock search index for testing.
///
/// Holds entries in memory with last-write-wins upserts. A query matches an
/// entry when every whitespace-separated token appears in its title,
/// description or categories (case-insensitive); matches are ranked by object
/// id. Hits can also be scripted to return a fixed ranked list.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockIndexRepository {
    entries: Arc<Mutex<BTreeMap<String, IndexEntry>>>,
    scripted_hits: Arc<Mutex<Option<Vec<String>>>>,
    failing: Arc<AtomicBool>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockIndexRepository {
    /// Create a new empty MockIndexRepository.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            scripted_hits: Arc::new(Mutex::new(None)),
            failing: Arc::new(AtomicBool::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return exactly these ids, in this order, from every search.
    pub fn script_hits(&self, ids: &[&str]) {
        let mut hits = self.scripted_hits.lock().unwrap();
        *hits = Some(ids.iter().map(|id| id.to_string()).collect());
    }

    /// Make every call fail with a transport error until switched off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Look up the stored entry for an object id.
    pub fn entry(&self, object_id: &str) -> Option<IndexEntry> {
        self.entries.lock().unwrap().get(object_id).cloned()
    }

    /// Snapshot of the whole index, ordered by object id.
    pub fn snapshot(&self) -> Vec<IndexEntry> {
        self.entries.lock().unwrap().values().cloned().collect()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> ClientResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::HttpError("Connection failed".to_string()));
        }
        Ok(())
    }
}

impl Default for MockIndexRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(entry: &IndexEntry, tokens: &[String]) -> bool {
    let mut haystack = String::new();
    for text in [&entry.title, &entry.description].into_iter().flatten() {
        haystack.push_str(&text.to_lowercase());
        haystack.push(' ');
    }
    for category in entry.categories.iter().flatten() {
        haystack.push_str(&category.to_lowercase());
        haystack.push(' ');
    }

    tokens.iter().all(|token| haystack.contains(token.as_str()))
}

#[async_trait]
impl SearchIndexRepository for MockIndexRepository {
    async fn upsert(&self, entry: &IndexEntry) -> ClientResult<()> {
        self.track_call("upsert")?;

        let mut entries = self.entries.lock().unwrap();
        entries.insert(entry.object_id.clone(), entry.clone());
        Ok(())
    }

    async fn delete(&self, object_id: &str) -> ClientResult<()> {
        self.track_call("delete")?;

        let mut entries = self.entries.lock().unwrap();
        entries.remove(object_id);
        Ok(())
    }

    async fn search(&self, query: &str) -> ClientResult<Vec<String>> {
        self.track_call("search")?;

        if let Some(hits) = self.scripted_hits.lock().unwrap().clone() {
            return Ok(hits);
        }

        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let entries = self.entries.lock().unwrap();
        Ok(entries
            .values()
            .filter(|entry| matches(entry, &tokens))
            .map(|entry| entry.object_id.clone())
            .collect())
    }
}
