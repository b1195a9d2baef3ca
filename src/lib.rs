//! etcd2-registry: an etcd v2 backend for a service-registration bridge.
//!
//! A host bridge discovers service instances and asks a registry adapter to
//! publish or withdraw them. This crate provides that adapter for etcd's v2
//! keys API, over plain HTTP or TLS with optional client certificates.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - [`bridge`]: the host-facing contract. Service records, the
//!   [`bridge::ports::RegistryAdapter`] port, and the factory map the
//!   composition root populates explicitly.
//! - [`etcd2`]: the etcd v2 adapter. Connection configuration, the HTTP(S)
//!   client builder and handle, and the adapter implementing the port.
//!
//! # Example
//!
//! ```no_run
//! use etcd2_registry::bridge::services::AdapterRegistry;
//! use etcd2_registry::etcd2::{Etcd2AdapterFactory, SCHEME};
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = AdapterRegistry::new();
//! registry.register(SCHEME, Etcd2AdapterFactory::new())?;
//! let adapter = registry.build(&Url::parse("etcd2://127.0.0.1:2379/services")?)?;
//! # let _ = adapter;
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod etcd2;
