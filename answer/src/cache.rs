//! Response cache keyed by normalized question text.
//!
//! Repeated questions skip the external generation call entirely. Keys
//! are content hashes of the lower-cased, trimmed question, so casing
//! and surrounding whitespace variants of the same question share one
//! entry. The map is insertion-ordered and capped: when full, the
//! oldest-inserted entry is evicted (no LRU touch on read).

use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Default maximum number of cached answers.
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded in-process cache of generated answers.
///
/// All mutation happens under a write lock, so the
/// get / capacity-check / evict / insert sequence cannot interleave
/// across concurrent requests.
pub struct AnswerCache {
    entries: RwLock<IndexMap<String, String>>,
    capacity: usize,
}

impl AnswerCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` answers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            capacity,
        }
    }

    /// Compute the cache key for a question.
    fn hash_key(question: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let normalized = question.trim().to_lowercase();
        let mut hasher = DefaultHasher::new();
        normalized.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }

    /// Look up a cached answer for a question.
    pub async fn get(&self, question: &str) -> Option<String> {
        let key = Self::hash_key(question);
        self.entries.read().await.get(&key).cloned()
    }

    /// Store an answer, evicting the oldest-inserted entry at capacity.
    pub async fn put(&self, question: &str, answer: impl Into<String>) {
        let key = Self::hash_key(question);
        let mut entries = self.entries.write().await;

        // Replacing an existing key does not grow the map, so only a
        // genuinely new entry triggers eviction.
        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            entries.shift_remove_index(0);
        }

        entries.insert(key, answer.into());
        debug!("Cached answer ({} entries)", entries.len());
    }

    /// Number of cached answers.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new()
    }
}
