//! HTTP(S) client for the etcd v2 API.
//!
//! [`ClientBuilder`] turns a [`ConnectionConfig`](crate::etcd2::config::ConnectionConfig)
//! into an [`EtcdClient`]. The TLS settings are fixed when the transport is
//! built; the handle only ever updates its member list.

mod builder;
mod error;
mod handle;
mod wire;

pub use builder::ClientBuilder;
pub use error::{ClientBuildError, EtcdApiError, EtcdError, EtcdResult};
pub use handle::EtcdClient;
pub use wire::{EtcdResponse, EtcdVersion, Member, MembersResponse, Node};
