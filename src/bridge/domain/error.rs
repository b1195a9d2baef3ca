//! Error types for service record validation.

use thiserror::Error;

/// Errors returned while constructing service domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceDomainError {
    /// The service identifier is empty or whitespace only.
    #[error("service ID must not be empty")]
    EmptyServiceId,

    /// The service identifier has surrounding whitespace or contains a path
    /// separator.
    #[error("service ID '{0}' must not contain '/' or surrounding whitespace")]
    InvalidServiceId(String),

    /// The service name is empty or whitespace only.
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// The service name has surrounding whitespace or contains a path
    /// separator.
    #[error("service name '{0}' must not contain '/' or surrounding whitespace")]
    InvalidServiceName(String),
}
