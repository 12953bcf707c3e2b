//! The key-value storage abstraction generated configuration groups bind to.
//!
//! Persistence is an external concern: the application supplies a
//! [`StoreFactory`] at startup and generated code addresses one [`ConfigStore`]
//! per group namespace. The traits mirror a conventional preferences backend:
//! one typed get/put pair per primitive kind, plus key removal and a full
//! clear.

use std::sync::Arc;

/// Typed key-value storage for one configuration group.
///
/// Implementations must provide atomic per-key get/put so generated accessors
/// stay safe under concurrent readers and writers. A `get_*` call for an
/// absent key returns the supplied default without recording it.
pub trait ConfigStore: Send + Sync {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn put_string(&self, key: &str, value: &str);

    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn put_bool(&self, key: &str, value: bool);

    fn get_i32(&self, key: &str, default: i32) -> i32;
    fn put_i32(&self, key: &str, value: i32);

    fn get_i64(&self, key: &str, default: i64) -> i64;
    fn put_i64(&self, key: &str, value: i64);

    fn get_f32(&self, key: &str, default: f32) -> f32;
    fn put_f32(&self, key: &str, value: f32);

    fn get_f64(&self, key: &str, default: f64) -> f64;
    fn put_f64(&self, key: &str, value: f64);

    /// Removes a single key, if present.
    fn remove(&self, key: &str);

    /// Removes every key in this store's namespace.
    fn clear_all(&self);
}

/// Opens one [`ConfigStore`] per group namespace.
///
/// The factory is installed once via [`crate::registry::install_store_factory`]
/// and consulted lazily the first time each group singleton is constructed.
pub trait StoreFactory: Send + Sync {
    /// Returns the store backing `group_key`. Calling this twice with the
    /// same key must yield stores observing the same underlying data.
    fn open(&self, group_key: &str) -> Arc<dyn ConfigStore>;
}
