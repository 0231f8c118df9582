//! Shared cache of loaded morpheme sources.
//!
//! Loading an analyzer dictionary is expensive, so analyzers built for
//! different fields usually share one source. Rather than a process-wide
//! singleton, the cache is an ordinary value that the caller creates and
//! passes to whoever builds analyzers.

use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::{Mutex, RwLock};

use super::MorphemeSource;
use crate::error::Result;

/// Keyed cache of `Arc<dyn MorphemeSource>` handles.
///
/// Insertion is "insert if absent": concurrent callers asking for the same
/// missing key run the loader once and all receive the same handle.
/// Invalidation only removes the cache entry; analyzers that already hold the
/// handle keep using it.
#[derive(Default)]
pub struct SourceCache {
    sources: RwLock<AHashMap<String, Arc<dyn MorphemeSource>>>,
    // One lock per key being loaded, so a slow load only blocks callers of
    // the same key.
    loading: Mutex<AHashMap<String, Arc<Mutex<()>>>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the source cached under `key`.
    pub fn get(&self, key: &str) -> Option<Arc<dyn MorphemeSource>> {
        self.sources.read().get(key).cloned()
    }

    /// Get the source cached under `key`, loading it with `load` if absent.
    ///
    /// `load` runs without the cache lock held, so other keys stay readable
    /// and loadable meanwhile, and `load` may itself use the cache for other
    /// keys. Asking for the same `key` from inside `load` deadlocks.
    ///
    /// If `load` fails nothing is cached and the error is returned.
    pub fn get_or_try_insert_with<F>(&self, key: &str, load: F) -> Result<Arc<dyn MorphemeSource>>
    where
        F: FnOnce() -> Result<Arc<dyn MorphemeSource>>,
    {
        if let Some(source) = self.get(key) {
            return Ok(source);
        }

        let slot = Arc::clone(self.loading.lock().entry(key.to_string()).or_default());
        let _loading = slot.lock();
        if let Some(source) = self.get(key) {
            return Ok(source);
        }

        let source = match load() {
            Ok(source) => source,
            Err(err) => {
                self.loading.lock().remove(key);
                return Err(err);
            }
        };
        debug!("loaded morpheme source '{}' for key '{key}'", source.name());
        self.sources.write().insert(key.to_string(), Arc::clone(&source));
        self.loading.lock().remove(key);
        Ok(source)
    }

    /// Remove the entry for `key`. Returns true if an entry was removed.
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.sources.write().remove(key).is_some();
        if removed {
            debug!("invalidated morpheme source for key '{key}'");
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.sources.write().clear();
        debug!("cleared morpheme source cache");
    }

    pub fn len(&self) -> usize {
        self.sources.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.read().is_empty()
    }
}

impl std::fmt::Debug for SourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources = self.sources.read();
        let mut keys: Vec<_> = sources.keys().collect();
        keys.sort();
        f.debug_struct("SourceCache").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;

    use super::*;
    use crate::analysis::source::StaticMorphemeSource;
    use crate::error::WakachiError;

    fn load_static() -> Result<Arc<dyn MorphemeSource>> {
        Ok(Arc::new(StaticMorphemeSource::new()))
    }

    #[test]
    fn test_insert_if_absent() {
        let cache = SourceCache::new();
        let first = cache.get_or_try_insert_with("ipadic", load_static).unwrap();
        let second = cache
            .get_or_try_insert_with("ipadic", || panic!("loader must not run twice"))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache = SourceCache::new();
        let result = cache.get_or_try_insert_with("broken", || Err(WakachiError::analysis("no dictionary")));
        assert!(result.is_err());
        assert!(cache.get("broken").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate() {
        let cache = SourceCache::new();
        let before = cache.get_or_try_insert_with("unidic", load_static).unwrap();

        assert!(cache.invalidate("unidic"));
        assert!(!cache.invalidate("unidic"));

        let after = cache.get_or_try_insert_with("unidic", load_static).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_loads_run_once() {
        let cache = SourceCache::new();
        let loads = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    cache
                        .get_or_try_insert_with("shared", || {
                            loads.fetch_add(1, Ordering::SeqCst);
                            load_static()
                        })
                        .unwrap();
                });
            }
        });

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_slow_load_does_not_block_other_keys() {
        let cache = SourceCache::new();
        let (release, wait) = mpsc::channel::<()>();

        let shared = &cache;

        thread::scope(|scope| {
            let slow = scope.spawn(move || {
                shared.get_or_try_insert_with("slow", move || {
                    wait.recv().unwrap();
                    load_static()
                })
            });

            shared.get_or_try_insert_with("fast", load_static).unwrap();
            assert!(shared.get("fast").is_some());
            release.send(()).unwrap();
            slow.join().unwrap().unwrap();
        });

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_loader_may_use_cache_for_other_keys() {
        let cache = SourceCache::new();
        let outer = cache
            .get_or_try_insert_with("outer", || cache.get_or_try_insert_with("inner", load_static))
            .unwrap();

        let inner = cache.get("inner").unwrap();
        assert!(Arc::ptr_eq(&outer, &inner));
        assert_eq!(cache.len(), 2);
    }
}
