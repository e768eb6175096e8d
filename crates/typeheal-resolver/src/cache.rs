//! Resolution caches.
//!
//! Both caches are append-only: once a key is populated it is never evicted or
//! overwritten, because resolution results do not change while the universe
//! they were computed against stays loaded. Writes go through
//! `entry().or_insert`, so when two callers race to fill the same key the
//! first write wins and the second is a no-op.
//!
//! A cache holds handles from one [`TypeUniverse`](crate::universe::TypeUniverse).
//! Share it between engines built over the same universe, never across
//! universes.

use crate::universe::{ModuleId, NameMatch, TypeId};
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};
use typeheal_common::limits::MOVED_INDEX_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    module: String,
    type_name: String,
    name_match: NameMatch,
}

impl CacheKey {
    fn new(module: &str, type_name: &str, name_match: NameMatch) -> Self {
        CacheKey {
            module: module.to_string(),
            type_name: type_name.to_string(),
            name_match,
        }
    }
}

/// Counters reported by [`ResolutionCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Memoizes `(module identity, type name)` lookups across resolution requests.
///
/// Application-scoped: create one per universe, wrap it in an `Arc` and hand
/// it to every engine that resolves against that universe. Only successful
/// lookups are stored.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    by_module_and_name: DashMap<CacheKey, TypeId>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        ResolutionCache::default()
    }

    pub fn get(&self, module: &str, type_name: &str, name_match: NameMatch) -> Option<TypeId> {
        let key = CacheKey::new(module, type_name, name_match);
        match self.by_module_and_name.get(&key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(module, type_name, ty = entry.0, "resolution cache hit");
                Some(*entry)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Record a lookup result. If the key is already populated the existing
    /// value is kept and returned.
    pub fn insert(&self, module: &str, type_name: &str, name_match: NameMatch, ty: TypeId) -> TypeId {
        let key = CacheKey::new(module, type_name, name_match);
        let stored = *self.by_module_and_name.entry(key).or_insert(ty);
        if stored != ty {
            debug!(module, type_name, kept = stored.0, discarded = ty.0, "resolution cache already populated");
        }
        stored
    }

    pub fn len(&self) -> usize {
        self.by_module_and_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_module_and_name.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

/// Old identities of moved types, built once per resolver.
///
/// - type key: `"OldNamespace.OldName"` (the type's previous full name)
/// - module key: `"OldModuleName--OldNamespace.OldName"`
///
/// The first type registered under a key keeps it; later registrations for
/// the same key are dropped.
#[derive(Debug, Clone)]
pub struct MovedTypeIndex {
    types: FxHashMap<String, TypeId>,
    modules: FxHashMap<String, ModuleId>,
}

impl Default for MovedTypeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MovedTypeIndex {
    pub fn new() -> Self {
        let mut types = FxHashMap::default();
        types.reserve(MOVED_INDEX_CAPACITY);
        MovedTypeIndex {
            types,
            modules: FxHashMap::default(),
        }
    }

    /// Key for the module index.
    pub fn module_key(old_module_name: &str, old_full_name: &str) -> String {
        format!("{old_module_name}--{old_full_name}")
    }

    /// Returns `false` when the key was already taken.
    pub fn register_type(&mut self, old_full_name: String, ty: TypeId) -> bool {
        match self.types.entry(old_full_name) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                debug!(
                    key = entry.key().as_str(),
                    kept = entry.get().0,
                    discarded = ty.0,
                    "duplicate moved-type registration"
                );
                false
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(ty);
                true
            }
        }
    }

    /// Returns `false` when the key was already taken.
    pub fn register_module(&mut self, key: String, module: ModuleId) -> bool {
        match self.modules.entry(key) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                debug!(key = entry.key().as_str(), "duplicate moved-module registration");
                false
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(module);
                true
            }
        }
    }

    pub fn get_type(&self, old_full_name: &str) -> Option<TypeId> {
        self.types.get(old_full_name).copied()
    }

    pub fn get_module(&self, old_module_name: &str, old_full_name: &str) -> Option<ModuleId> {
        self.modules
            .get(&Self::module_key(old_module_name, old_full_name))
            .copied()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}

#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod tests;
