//! Per-property working defaults that can be overridden at runtime.

use parking_lot::RwLock;

/// A mutable cell holding one property's working default.
///
/// Generated groups own one cell per property, seeded with the compile-time
/// default from the schema. A remote configuration push may replace the value
/// through the generated `override_*_default` operation without touching what
/// is already persisted; reset-to-defaults then writes the overridden value.
#[derive(Debug)]
pub struct DefaultCell<T> {
    value: RwLock<T>,
}

impl<T: Clone> DefaultCell<T> {
    /// Creates a cell seeded with the compile-time default.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Returns the current working default.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Replaces the working default.
    pub fn set(&self, value: T) {
        *self.value.write() = value;
    }
}
