//! Composition-root services for wiring registry backends.

mod registry;

pub use registry::{AdapterRegistry, AdapterRegistryError, AdapterRegistryResult};
