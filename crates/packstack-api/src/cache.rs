//! # View Cache
//!
//! Memoizes built [`PackView`]s. Entries are keyed by the pack document's
//! content digest plus the unit system and compact flag, so a changed
//! document never matches an old entry and no explicit invalidation is
//! needed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use packstack_core::{EngineResult, PackData, PackView, UnitSystem};

/// Entries kept before the cache is cleared wholesale.
const MAX_ENTRIES: usize = 1024;

type CacheKey = (String, UnitSystem, bool);

/// Thread-safe, cloneable view cache.
///
/// The lock is `parking_lot` and is never held across `.await`.
#[derive(Debug, Clone)]
pub struct ViewCache {
    enabled: bool,
    entries: Arc<RwLock<HashMap<CacheKey, PackView>>>,
}

impl ViewCache {
    /// Create a cache. A disabled cache builds every view afresh.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Return the cached view for `(data, system, compact)`, building and
    /// storing it on a miss. Build errors are not cached.
    pub fn get_or_build(
        &self,
        data: &PackData,
        system: UnitSystem,
        compact: bool,
    ) -> EngineResult<PackView> {
        if !self.enabled {
            return PackView::build(data, system, compact);
        }

        let key = (data.content_digest(), system, compact);
        if let Some(view) = self.entries.read().get(&key) {
            tracing::trace!(digest = %key.0, unit = %system, "view cache hit");
            return Ok(view.clone());
        }

        let view = PackView::build(data, system, compact)?;
        let mut entries = self.entries.write();
        if entries.len() >= MAX_ENTRIES {
            entries.clear();
        }
        entries.insert(key, view.clone());
        Ok(view)
    }

    /// Number of cached views.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(weight: f64) -> PackData {
        PackData::from_json(&format!(
            r#"{{"pack": {{"id": 1, "title": "T"}}, "categories": [
                {{"id": 1, "name": "C", "items": [
                    {{"id": 1, "name": "I", "quantity": 1, "weight": {weight}}}
                ]}}
            ]}}"#
        ))
        .unwrap()
    }

    #[test]
    fn caches_per_unit_system() {
        let cache = ViewCache::new(true);
        let d = data(500.0);
        let a = cache.get_or_build(&d, UnitSystem::Metric, false).unwrap();
        let b = cache.get_or_build(&d, UnitSystem::Metric, false).unwrap();
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);

        cache.get_or_build(&d, UnitSystem::Imperial, false).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn changed_data_misses() {
        let cache = ViewCache::new(true);
        let a = cache.get_or_build(&data(500.0), UnitSystem::Metric, false).unwrap();
        let b = cache.get_or_build(&data(1500.0), UnitSystem::Metric, false).unwrap();
        assert_ne!(a, b);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let cache = ViewCache::new(false);
        cache.get_or_build(&data(1.0), UnitSystem::Metric, true).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn build_errors_are_not_cached() {
        let cache = ViewCache::new(true);
        assert!(cache.get_or_build(&data(-1.0), UnitSystem::Metric, false).is_err());
        assert!(cache.is_empty());
    }
}
