//! Key-value representation of a service instance.

use super::{BasePath, RegistryKey};
use crate::bridge::domain::Service;

/// The etcd entry written for one service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    key: RegistryKey,
    value: String,
    ttl_seconds: Option<u64>,
}

impl RegistryEntry {
    /// Builds the entry for a service under a base path.
    ///
    /// The value is `ip:port` and the TTL is truncated to whole seconds; a
    /// TTL under one second yields an entry without expiration.
    #[must_use]
    pub fn for_service(base_path: &BasePath, service: &Service) -> Self {
        let seconds = service.ttl().as_secs();
        Self {
            key: base_path.key_for(service),
            value: service.address().to_string(),
            ttl_seconds: (seconds > 0).then_some(seconds),
        }
    }

    /// Returns the entry key.
    #[must_use]
    pub const fn key(&self) -> &RegistryKey {
        &self.key
    }

    /// Returns the entry value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the expiration in seconds, if any.
    #[must_use]
    pub const fn ttl_seconds(&self) -> Option<u64> {
        self.ttl_seconds
    }
}
