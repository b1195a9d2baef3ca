//! Validated identifier and name types for service instances.
//!
//! Both values become path segments of a registry key exactly as given, so
//! neither may be blank, carry surrounding whitespace or contain `/`.

use super::ServiceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between registry key segments.
const KEY_SEPARATOR: char = '/';

/// Unique identifier of one service instance, as assigned by the host.
///
/// Hosts typically derive it from the machine, container and port, e.g.
/// `node-1:web-3:8080`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Creates a validated service identifier.
    ///
    /// The value is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceDomainError::EmptyServiceId`] when the value is
    /// blank, or [`ServiceDomainError::InvalidServiceId`] when it has
    /// surrounding whitespace or contains `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, ServiceDomainError> {
        let raw = value.into();

        if raw.trim().is_empty() {
            return Err(ServiceDomainError::EmptyServiceId);
        }

        if !is_key_segment(&raw) {
            return Err(ServiceDomainError::InvalidServiceId(raw));
        }

        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Validated service name shared by all instances of one service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    /// Creates a validated service name.
    ///
    /// The value is kept verbatim, case included.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceDomainError::EmptyServiceName`] when the value is
    /// blank, or [`ServiceDomainError::InvalidServiceName`] when it has
    /// surrounding whitespace or contains `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, ServiceDomainError> {
        let raw = value.into();

        if raw.trim().is_empty() {
            return Err(ServiceDomainError::EmptyServiceName);
        }

        if !is_key_segment(&raw) {
            return Err(ServiceDomainError::InvalidServiceName(raw));
        }

        Ok(Self(raw))
    }

    /// Returns the service name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

fn is_key_segment(value: &str) -> bool {
    value.trim() == value && !value.contains(KEY_SEPARATOR)
}
