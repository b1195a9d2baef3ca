//! etcd v2 registry adapter.
//!
//! Services are stored as plain keys under a base path taken from the
//! registry URI:
//!
//! ```text
//! <base path>/<service name>/<service id> = "<ip>:<port>"   (ttl = service TTL)
//! ```
//!
//! The module follows hexagonal architecture:
//!
//! - Key convention in [`domain`]
//! - Connection settings in [`config`]
//! - The HTTP(S) client builder and handle in [`client`]
//! - The [`EtcdAdapter`] implementing the bridge port, and the
//!   [`Etcd2AdapterFactory`] the composition root registers

mod adapter;
pub mod client;
pub mod config;
pub mod domain;
mod factory;

pub use adapter::EtcdAdapter;
pub use factory::{Etcd2AdapterFactory, SCHEME};

#[cfg(test)]
mod tests;
