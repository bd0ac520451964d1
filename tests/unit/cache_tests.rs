/*!
 * Tests for translation cache functionality
 */

use slidelingo::translation::cache::TranslationCache;

#[test]
fn test_cache_new_shouldStartEmpty() {
    let cache = TranslationCache::new();
    assert!(cache.is_empty());
    assert!(cache.get("sl", "Hello").is_none());
}

#[test]
fn test_cache_store_shouldStoreTranslation() {
    let cache = TranslationCache::new();
    cache.store("sl", "Hello", "Zdravo");
    assert_eq!(cache.get("sl", "Hello"), Some("Zdravo".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_get_withDifferentTargetLanguage_shouldMiss() {
    let cache = TranslationCache::default();
    cache.store("sl", "Hello", "Zdravo");
    assert!(cache.get("hr", "Hello").is_none());
}

#[test]
fn test_cache_get_shouldMatchExactTextOnly() {
    let cache = TranslationCache::default();
    cache.store("sl", "Hello", "Zdravo");
    assert!(cache.get("sl", "hello").is_none());
    assert!(cache.get("sl", "Hello ").is_none());
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let cache = TranslationCache::default();
    cache.get("sl", "Hello");
    cache.store("sl", "Hello", "Zdravo");
    cache.get("sl", "Hello");
    cache.get("sl", "Hello");

    let (hits, misses, rate) = cache.stats();
    assert_eq!(hits, 2);
    assert_eq!(misses, 1);
    assert!((rate - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_cache_store_withSameKey_shouldOverwrite() {
    let cache = TranslationCache::default();
    cache.store("sl", "Hello", "Zdravo");
    cache.store("sl", "Hello", "Živjo");
    assert_eq!(cache.get("sl", "Hello"), Some("Živjo".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_clone_shouldShareEntries() {
    let cache = TranslationCache::default();
    let cloned = cache.clone();
    cache.store("sl", "Hello", "Zdravo");
    assert_eq!(cloned.get("sl", "Hello"), Some("Zdravo".to_string()));
}

#[test]
fn test_cache_clear_shouldResetEntriesAndCounters() {
    let cache = TranslationCache::default();
    cache.store("sl", "Hello", "Zdravo");
    cache.get("sl", "Hello");
    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats(), (0, 0, 0.0));
}
