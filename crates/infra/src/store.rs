use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use doceria_core::Entity;

/// Keyed repository abstraction over the system's records.
///
/// Each aggregate owns its child records (combo lines, transaction lines)
/// inside the stored value, so `remove` and whole-value `upsert` carry the
/// cascade semantics by construction.
pub trait Store<K, V>: Send + Sync {
    fn find(&self, key: &K) -> Option<V>;
    fn upsert(&self, key: K, value: V);
    fn list(&self) -> Vec<V>;
    /// Remove a record; returns whether it existed.
    fn remove(&self, key: &K) -> bool;
}

impl<K, V, S> Store<K, V> for Arc<S>
where
    S: Store<K, V> + ?Sized,
{
    fn find(&self, key: &K) -> Option<V> {
        (**self).find(key)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }

    fn remove(&self, key: &K) -> bool {
        (**self).remove(key)
    }
}

/// In-memory store.
///
/// Keys are time-ordered (UUIDv7), so `list` naturally returns records in
/// creation order.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InMemoryStore<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Entity<Id = K> + Clone + Send + Sync + 'static,
{
    /// Store an entity under its own id.
    pub fn save(&self, entity: V) {
        self.upsert(entity.id().clone(), entity);
    }
}

impl<K, V> Store<K, V> for InMemoryStore<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn find(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    fn list(&self) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.values().cloned().collect()
    }

    fn remove(&self, key: &K) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(key).is_some(),
            Err(_) => false,
        }
    }
}
