//! Domain model for service instances handed to registry adapters.
//!
//! A [`Service`] is what the host discovered: a named, identified instance
//! reachable at an IP address and port, re-asserted every TTL.

mod error;
mod ids;
mod service;

pub use error::ServiceDomainError;
pub use ids::{ServiceId, ServiceName};
pub use service::Service;
