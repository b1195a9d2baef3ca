//! Port contracts between the host bridge and registry backends.

mod adapter;
mod factory;

pub use adapter::{RegistryAdapter, RegistryAdapterError, RegistryAdapterResult};
pub use factory::{AdapterFactory, AdapterFactoryError};
