//! Registry key convention for the etcd v2 adapter.

mod entry;
mod key;

pub use entry::RegistryEntry;
pub use key::{BasePath, RegistryKey};
