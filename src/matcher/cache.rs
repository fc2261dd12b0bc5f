//! Compiled expression caching.
//!
//! Filter expressions are typed once by an operator and then evaluated against
//! every IED/LD/LN name on screen, so each distinct expression is compiled
//! once and shared through an `Arc`.

use crate::config::MatcherConfig;
use crate::matcher::compiled::CompiledExpression;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// LRU-bounded cache of compiled filter expressions.
///
/// # Thread Safety
/// The storage sits behind an `RwLock`; hits take the write lock only to
/// bump their LRU position. The catalog itself never spawns threads, but
/// the process-wide instance may be reached from several callers.
#[derive(Debug)]
pub struct ExpressionCache {
    storage: RwLock<CacheStorage>,
    config: MatcherConfig,
}

#[derive(Debug, Default)]
struct CacheStorage {
    expressions: HashMap<String, Arc<CompiledExpression>>,

    /// Least recently used first
    access_order: Vec<String>,

    stats: CacheStats,
}

/// Cache performance statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total cache lookups
    pub total_lookups: usize,

    /// Cache hits
    pub hits: usize,

    /// Cache misses
    pub misses: usize,

    /// Expression compilations
    pub compilations: usize,

    /// Evictions performed
    pub evictions: usize,
}

impl ExpressionCache {
    /// Create a cache with default matcher settings.
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    /// Create a cache that compiles with `config`.
    pub fn with_config(config: MatcherConfig) -> Self {
        Self {
            storage: RwLock::new(CacheStorage::default()),
            config,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Get the compiled form of `expression`, compiling it on a miss.
    pub fn get_or_compile(&self, expression: &str) -> Arc<CompiledExpression> {
        {
            let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
            storage.stats.total_lookups += 1;

            if let Some(compiled) = storage.expressions.get(expression).cloned() {
                storage.stats.hits += 1;
                if let Some(pos) = storage.access_order.iter().position(|e| e == expression) {
                    storage.access_order.remove(pos);
                }
                storage.access_order.push(expression.to_string());
                return compiled;
            }

            storage.stats.misses += 1;
        }

        self.compile_and_cache(expression)
    }

    fn compile_and_cache(&self, expression: &str) -> Arc<CompiledExpression> {
        let compiled = Arc::new(CompiledExpression::with_config(expression, &self.config));

        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        storage.stats.compilations += 1;

        if self.config.cache_capacity == 0 {
            return compiled;
        }

        // Another caller may have compiled the same expression meanwhile.
        if let Some(existing) = storage.expressions.get(expression) {
            return Arc::clone(existing);
        }

        while storage.expressions.len() >= self.config.cache_capacity {
            if !Self::evict_lru(&mut storage) {
                break;
            }
        }

        storage
            .expressions
            .insert(expression.to_string(), Arc::clone(&compiled));
        storage.access_order.push(expression.to_string());
        compiled
    }

    fn evict_lru(storage: &mut CacheStorage) -> bool {
        if storage.access_order.is_empty() {
            return false;
        }
        let oldest = storage.access_order.remove(0);
        storage.expressions.remove(&oldest);
        storage.stats.evictions += 1;
        tracing::trace!(expression = %oldest, "evicted compiled expression");
        true
    }

    /// Get cache statistics for monitoring.
    pub fn stats(&self) -> CacheStats {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        storage.stats.clone()
    }

    pub fn hit_ratio(&self) -> f64 {
        let stats = self.stats();
        if stats.total_lookups == 0 {
            return 0.0;
        }
        stats.hits as f64 / stats.total_lookups as f64
    }

    /// Drop every cached expression and reset statistics.
    pub fn clear(&self) {
        let mut storage = self.storage.write().unwrap_or_else(PoisonError::into_inner);
        *storage = CacheStorage::default();
    }

    pub fn size(&self) -> usize {
        let storage = self.storage.read().unwrap_or_else(PoisonError::into_inner);
        storage.expressions.len()
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_CACHE: std::sync::OnceLock<ExpressionCache> = std::sync::OnceLock::new();

/// Process-wide cache used by [`matches`](crate::matcher::matches).
pub fn global_expression_cache() -> &'static ExpressionCache {
    GLOBAL_CACHE.get_or_init(ExpressionCache::new)
}

/// Install the process-wide cache with custom settings.
///
/// Returns `false` when the cache was already initialized, in which case the
/// existing settings stay in effect.
pub fn init_global_cache(config: MatcherConfig) -> bool {
    GLOBAL_CACHE.set(ExpressionCache::with_config(config)).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_shares_instance() {
        let cache = ExpressionCache::new();

        let first = cache.get_or_compile("PDIS*");
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.compilations, 1);

        let second = cache.get_or_compile("PDIS*");
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.total_lookups, 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert!((cache.hit_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = ExpressionCache::with_config(MatcherConfig {
            cache_capacity: 2,
            ..Default::default()
        });

        cache.get_or_compile("A*");
        cache.get_or_compile("B*");
        cache.get_or_compile("A*"); // B* is now least recent
        cache.get_or_compile("C*");

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.stats().evictions, 1);

        cache.get_or_compile("A*");
        assert_eq!(cache.stats().hits, 2);
        cache.get_or_compile("B*");
        assert_eq!(cache.stats().misses, 4);
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = ExpressionCache::with_config(MatcherConfig {
            cache_capacity: 0,
            ..Default::default()
        });

        let first = cache.get_or_compile("X1-3");
        let second = cache.get_or_compile("X1-3");
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.stats().compilations, 2);
        assert!(second.matches("x2"));
    }

    #[test]
    fn test_clear_resets_stats() {
        let cache = ExpressionCache::new();
        cache.get_or_compile("*");
        cache.clear();
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.hit_ratio(), 0.0);
    }

    #[test]
    fn test_cached_expression_uses_cache_config() {
        let cache = ExpressionCache::with_config(MatcherConfig {
            case_insensitive: false,
            ..Default::default()
        });
        let compiled = cache.get_or_compile("PDIS*");
        assert!(compiled.matches("PDIS1"));
        assert!(!compiled.matches("pdis1"));
    }
}
