//! Test helpers shared across crates.
//!
//! Currently provides an in-memory [`prefkit::ConfigStore`] backend so tests
//! can exercise generated-style accessors without a real preferences store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use prefkit::{ConfigStore, StoreFactory};

/// One stored primitive value.
#[derive(Debug, Clone, PartialEq)]
enum Stored {
    Str(String),
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

/// A `HashMap`-backed [`ConfigStore`] with per-key atomicity via a mutex.
///
/// A `get_*` call whose key is absent or holds a different kind returns the
/// supplied default, matching conventional preferences-store behaviour.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Stored>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored. Useful for asserting `clear_all`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.values.lock().get(key) {
            Some(Stored::Str(s)) => s.clone(),
            _ => default.to_owned(),
        }
    }

    fn put_string(&self, key: &str, value: &str) {
        self.values
            .lock()
            .insert(key.to_owned(), Stored::Str(value.to_owned()));
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.lock().get(key) {
            Some(Stored::Bool(b)) => *b,
            _ => default,
        }
    }

    fn put_bool(&self, key: &str, value: bool) {
        self.values.lock().insert(key.to_owned(), Stored::Bool(value));
    }

    fn get_i32(&self, key: &str, default: i32) -> i32 {
        match self.values.lock().get(key) {
            Some(Stored::I32(v)) => *v,
            _ => default,
        }
    }

    fn put_i32(&self, key: &str, value: i32) {
        self.values.lock().insert(key.to_owned(), Stored::I32(value));
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        match self.values.lock().get(key) {
            Some(Stored::I64(v)) => *v,
            _ => default,
        }
    }

    fn put_i64(&self, key: &str, value: i64) {
        self.values.lock().insert(key.to_owned(), Stored::I64(value));
    }

    fn get_f32(&self, key: &str, default: f32) -> f32 {
        match self.values.lock().get(key) {
            Some(Stored::F32(v)) => *v,
            _ => default,
        }
    }

    fn put_f32(&self, key: &str, value: f32) {
        self.values.lock().insert(key.to_owned(), Stored::F32(value));
    }

    fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.values.lock().get(key) {
            Some(Stored::F64(v)) => *v,
            _ => default,
        }
    }

    fn put_f64(&self, key: &str, value: f64) {
        self.values.lock().insert(key.to_owned(), Stored::F64(value));
    }

    fn remove(&self, key: &str) {
        self.values.lock().remove(key);
    }

    fn clear_all(&self) {
        self.values.lock().clear();
    }
}

/// A [`StoreFactory`] handing out one shared [`MemoryStore`] per group key.
#[derive(Debug, Default)]
pub struct MemoryStoreFactory {
    stores: Mutex<HashMap<String, Arc<MemoryStore>>>,
}

impl MemoryStoreFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the concrete store for `group_key`, creating it if needed.
    #[must_use]
    pub fn store(&self, group_key: &str) -> Arc<MemoryStore> {
        Arc::clone(
            self.stores
                .lock()
                .entry(group_key.to_owned())
                .or_insert_with(|| Arc::new(MemoryStore::new())),
        )
    }
}

impl StoreFactory for MemoryStoreFactory {
    fn open(&self, group_key: &str) -> Arc<dyn ConfigStore> {
        self.store(group_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_fall_back_to_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.get_string("timeout", "30s"), "30s");
        store.put_string("timeout", "45s");
        assert_eq!(store.get_string("timeout", "30s"), "45s");
    }

    #[test]
    fn kind_mismatch_falls_back_to_default() {
        let store = MemoryStore::new();
        store.put_string("retries", "five");
        assert_eq!(store.get_i32("retries", 3), 3);
    }

    #[test]
    fn factory_reuses_stores_per_group() {
        let factory = MemoryStoreFactory::new();
        let a = factory.store("net");
        let b = factory.store("net");
        assert!(Arc::ptr_eq(&a, &b));
        a.put_bool("flag", true);
        assert!(b.get_bool("flag", false));
    }
}
