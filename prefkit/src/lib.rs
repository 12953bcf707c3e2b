//! Runtime support for `prefkit`-generated configuration groups.
//!
//! Code emitted by the companion `prefkit_codegen` crate binds every schema
//! property to the [`ConfigStore`] abstraction defined here and exposes
//! [`ConfigItemDescriptor`] metadata for settings UIs. This crate contains no
//! persistence itself; applications install a [`StoreFactory`] for their
//! backend of choice during startup.

mod default_cell;
mod descriptor;
mod error;
pub mod registry;
mod store;
mod value;

pub use default_cell::DefaultCell;
pub use descriptor::{ChoiceItem, ConfigItemDescriptor, OptionItem, StandardItem};
pub use error::RegistryError;
pub use registry::{group_instance, install_store_factory, try_group_instance};
pub use store::{ConfigStore, StoreFactory};
pub use value::ConfigValue;
