//! Service instance record handed to registry adapters.

use super::{ServiceDomainError, ServiceId, ServiceName};
use std::collections::BTreeMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// One discovered service instance.
///
/// Tags and attributes belong to the host's model; adapters may ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    id: ServiceId,
    name: ServiceName,
    ip: IpAddr,
    port: u16,
    ttl: Duration,
    tags: Vec<String>,
    attrs: BTreeMap<String, String>,
}

impl Service {
    /// Creates a service record without a TTL, tags or attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceDomainError`] when the identifier or name fails
    /// validation.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        ip: IpAddr,
        port: u16,
    ) -> Result<Self, ServiceDomainError> {
        Ok(Self {
            id: ServiceId::new(id)?,
            name: ServiceName::new(name)?,
            ip,
            port,
            ttl: Duration::ZERO,
            tags: Vec::new(),
            attrs: BTreeMap::new(),
        })
    }

    /// Sets the time-to-live the registry entry should carry.
    ///
    /// A zero TTL means the entry never expires.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replaces the service tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Replaces the service attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.attrs = attrs.into_iter().collect();
        self
    }

    /// Returns the instance identifier.
    #[must_use]
    pub const fn id(&self) -> &ServiceId {
        &self.id
    }

    /// Returns the service name.
    #[must_use]
    pub const fn name(&self) -> &ServiceName {
        &self.name
    }

    /// Returns the instance IP address.
    #[must_use]
    pub const fn ip(&self) -> IpAddr {
        self.ip
    }

    /// Returns the instance port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the socket address, rendered by `Display` as `ip:port` with
    /// IPv6 addresses bracketed.
    #[must_use]
    pub const fn address(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    /// Returns the time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the service tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the service attributes.
    #[must_use]
    pub const fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }
}
