//! Process-wide registry of group singletons and the installed store factory.
//!
//! Generated `shared()` accessors resolve their group instance here. The
//! cache guarantees at-most-once construction per group key under concurrent
//! first access; a mutex is held across initialisation so two racing callers
//! observe the same instance.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::{Mutex, RwLock};

use crate::error::RegistryError;
use crate::store::{ConfigStore, StoreFactory};

static FACTORY: LazyLock<RwLock<Option<Arc<dyn StoreFactory>>>> =
    LazyLock::new(|| RwLock::new(None));

static INSTANCES: LazyLock<Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Installs the process-wide store factory.
///
/// Call once during application startup, before any generated `shared()`
/// accessor runs. Installing a new factory does not invalidate group
/// instances that were already constructed.
pub fn install_store_factory(factory: Arc<dyn StoreFactory>) {
    *FACTORY.write() = Some(factory);
}

/// Returns the group instance for `group_key`, constructing it at most once.
///
/// `init` receives the store opened for the group's namespace and runs under
/// the registry lock, so concurrent first callers never construct twice.
///
/// # Errors
///
/// Returns [`RegistryError::FactoryNotInstalled`] when no factory has been
/// installed, and [`RegistryError::InstanceTypeMismatch`] when the key is
/// already bound to a different concrete type.
pub fn try_group_instance<T, F>(group_key: &str, init: F) -> Result<Arc<T>, RegistryError>
where
    T: Send + Sync + 'static,
    F: FnOnce(Arc<dyn ConfigStore>) -> T,
{
    let mut instances = INSTANCES.lock();
    if let Some(existing) = instances.get(group_key) {
        return Arc::clone(existing)
            .downcast::<T>()
            .map_err(|_| RegistryError::InstanceTypeMismatch {
                group_key: group_key.to_owned(),
            });
    }

    let factory = FACTORY
        .read()
        .as_ref()
        .map(Arc::clone)
        .ok_or(RegistryError::FactoryNotInstalled)?;
    let store = factory.open(group_key);
    let instance = Arc::new(init(store));
    tracing::debug!(group_key, "constructed config group instance");
    instances.insert(group_key.to_owned(), Arc::clone(&instance) as Arc<dyn Any + Send + Sync>);
    Ok(instance)
}

/// Infallible variant used by generated `shared()` accessors.
///
/// # Panics
///
/// Panics when no store factory is installed or the key is bound to a
/// different type; both indicate startup wiring bugs rather than runtime
/// conditions.
#[must_use]
pub fn group_instance<T, F>(group_key: &str, init: F) -> Arc<T>
where
    T: Send + Sync + 'static,
    F: FnOnce(Arc<dyn ConfigStore>) -> T,
{
    match try_group_instance(group_key, init) {
        Ok(instance) => instance,
        Err(err) => panic!("config registry failure for group '{group_key}': {err}"),
    }
}

/// Drops every cached instance and the installed factory.
///
/// Intended for tests that need a pristine registry; production code has no
/// reason to call it.
pub fn reset_for_tests() {
    INSTANCES.lock().clear();
    *FACTORY.write() = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct NullStore;

    impl ConfigStore for NullStore {
        fn get_string(&self, _key: &str, default: &str) -> String {
            default.to_owned()
        }
        fn put_string(&self, _key: &str, _value: &str) {}
        fn get_bool(&self, _key: &str, default: bool) -> bool {
            default
        }
        fn put_bool(&self, _key: &str, _value: bool) {}
        fn get_i32(&self, _key: &str, default: i32) -> i32 {
            default
        }
        fn put_i32(&self, _key: &str, _value: i32) {}
        fn get_i64(&self, _key: &str, default: i64) -> i64 {
            default
        }
        fn put_i64(&self, _key: &str, _value: i64) {}
        fn get_f32(&self, _key: &str, default: f32) -> f32 {
            default
        }
        fn put_f32(&self, _key: &str, _value: f32) {}
        fn get_f64(&self, _key: &str, default: f64) -> f64 {
            default
        }
        fn put_f64(&self, _key: &str, _value: f64) {}
        fn remove(&self, _key: &str) {}
        fn clear_all(&self) {}
    }

    struct NullFactory;

    impl StoreFactory for NullFactory {
        fn open(&self, _group_key: &str) -> Arc<dyn ConfigStore> {
            Arc::new(NullStore)
        }
    }

    #[derive(Debug)]
    struct GroupA;
    #[derive(Debug)]
    struct GroupB;

    #[test]
    #[serial]
    fn missing_factory_is_reported() {
        reset_for_tests();
        let err = try_group_instance("net", |_| GroupA).unwrap_err();
        assert!(matches!(err, RegistryError::FactoryNotInstalled));
    }

    #[test]
    #[serial]
    fn instances_are_constructed_once_per_key() {
        reset_for_tests();
        install_store_factory(Arc::new(NullFactory));
        let first = try_group_instance("net", |_| GroupA).expect("first instance");
        let second = try_group_instance("net", |_| GroupA).expect("cached instance");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    #[serial]
    fn conflicting_types_are_rejected() {
        reset_for_tests();
        install_store_factory(Arc::new(NullFactory));
        let _a = try_group_instance("net", |_| GroupA).expect("seed instance");
        let err = try_group_instance::<GroupB, _>("net", |_| GroupB).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InstanceTypeMismatch { ref group_key } if group_key == "net"
        ));
    }
}
