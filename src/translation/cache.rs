/*!
 * Translation caching functionality.
 *
 * Each gateway owns one cache for the lifetime of a job. Entries are keyed
 * by target language and the exact source text; there is no eviction, a
 * single document only holds a bounded number of distinct strings.
 */

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use log::debug;

/// Cache key combining target language and source text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Target language code
    target_language: String,

    /// Source text to translate
    source_text: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(target_language: &str, source_text: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            source_text: source_text.to_string(),
        }
    }
}

/// Translation cache for storing and retrieving translations
pub struct TranslationCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl TranslationCache {
    /// Create an empty translation cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, target_language: &str, source_text: &str) -> Option<String> {
        let key = CacheKey::new(target_language, source_text);
        let cache = self.cache.read();

        match cache.get(&key) {
            Some(translation) => {
                *self.hits.write() += 1;
                debug!("Cache hit for '{}' (-> {})", truncate_text(source_text, 30), target_language);
                Some(translation.clone())
            },
            None => {
                *self.misses.write() += 1;
                debug!("Cache miss for '{}' (-> {})", truncate_text(source_text, 30), target_language);
                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, target_language: &str, source_text: &str, translation: &str) {
        let key = CacheKey::new(target_language, source_text);
        self.cache.write().insert(key, translation.to_string());

        debug!("Cached translation for '{}' (-> {})", truncate_text(source_text, 30), target_language);
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("Translation cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
