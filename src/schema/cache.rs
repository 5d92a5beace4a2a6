//! Thread-safe cache of compiled schema documents.
//!
//! Schemas are compiled once per suite and shared across scenarios through
//! `Arc`, so scenarios running on separate test threads never recompile.
//! Readers take the read lock only; a miss takes the write lock and re-checks
//! before inserting.

use super::load::logical_name;
use super::{load_schema, SchemaDocument};
use crate::error::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    cache: Arc<RwLock<HashMap<String, Arc<SchemaDocument>>>>,
    /// Directory searched before the bundled resources
    schema_dir: Option<PathBuf>,
}

impl SchemaCache {
    pub fn new(schema_dir: Option<PathBuf>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            schema_dir,
        }
    }

    /// Get a cached schema or load, compile and cache it.
    pub fn get_or_load(&self, name: &str) -> Result<Arc<SchemaDocument>> {
        let name = logical_name(name);
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(doc) = cache.get(name) {
                debug!(schema = name, "Schema cache hit");
                return Ok(Arc::clone(doc));
            }
        }

        let loaded = Arc::new(load_schema(name, self.schema_dir.as_deref())?);
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = cache.get(name) {
            return Ok(Arc::clone(existing));
        }
        cache.insert(name.to_string(), Arc::clone(&loaded));
        info!(schema = name, cache_size = cache.len(), "Schema compiled and cached");
        Ok(loaded)
    }

    /// Load every named schema up front, stopping at the first failure.
    ///
    /// Returns the number of schemas now cached.
    pub fn preload<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<usize> {
        for name in names {
            self.get_or_load(name)?;
        }
        Ok(self.size())
    }

    pub fn size(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SINGLE_RESOURCE_SCHEMA;
    use std::thread;

    #[test]
    fn test_get_or_load_shares_instance() {
        let cache = SchemaCache::new(None);
        let first = cache.get_or_load(SINGLE_RESOURCE_SCHEMA).unwrap();
        let second = cache.get_or_load(SINGLE_RESOURCE_SCHEMA).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache = SchemaCache::new(None);
        assert!(cache.get_or_load("missing.json").is_err());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_preload_stops_at_first_failure() {
        let cache = SchemaCache::new(None);
        assert_eq!(cache.preload([SINGLE_RESOURCE_SCHEMA]).unwrap(), 1);
        assert!(cache.preload(["missing.json", SINGLE_RESOURCE_SCHEMA]).is_err());
        cache.clear();
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = SchemaCache::new(None);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || cache.get_or_load(SINGLE_RESOURCE_SCHEMA).is_ok())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(cache.size(), 1);
    }
}
