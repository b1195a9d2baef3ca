//! Registry adapter port driven by the host bridge.

use crate::bridge::domain::Service;
use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Result type for registry adapter operations.
pub type RegistryAdapterResult<T> = Result<T, RegistryAdapterError>;

/// Lifecycle contract the host bridge calls for every discovered service.
///
/// Implementations perform each call directly against their backend and do
/// not retry; the host decides when to call again.
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Checks that the backend is reachable.
    async fn ping(&self) -> RegistryAdapterResult<()>;

    /// Publishes a service instance.
    async fn register(&self, service: &Service) -> RegistryAdapterResult<()>;

    /// Withdraws a service instance.
    async fn deregister(&self, service: &Service) -> RegistryAdapterResult<()>;

    /// Re-asserts a service instance before its TTL lapses.
    async fn refresh(&self, service: &Service) -> RegistryAdapterResult<()>;

    /// Lists service instances known to the backend.
    async fn services(&self) -> RegistryAdapterResult<Vec<Service>>;
}

/// Backend failure surfaced through the registry adapter port.
///
/// The backend error is carried unchanged: `Display` and `source()` are the
/// backend's own, and [`RegistryAdapterError::downcast_ref`] recovers the
/// concrete type.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct RegistryAdapterError(Arc<dyn Error + Send + Sync>);

impl RegistryAdapterError {
    /// Wraps a backend error.
    pub fn backend(err: impl Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Returns the backend error if it has type `E`.
    #[must_use]
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        let inner: &(dyn Error + Send + Sync) = &*self.0;
        inner.downcast_ref::<E>()
    }
}
