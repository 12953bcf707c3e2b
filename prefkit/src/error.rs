//! Error types for the runtime support layer.

use thiserror::Error;

/// Errors raised while resolving group singletons.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// No [`crate::StoreFactory`] has been installed yet.
    #[error("no store factory installed; call install_store_factory() during startup")]
    FactoryNotInstalled,

    /// The cached instance for a group key has a different concrete type.
    #[error("group '{group_key}' is already registered with a different type")]
    InstanceTypeMismatch { group_key: String },
}
