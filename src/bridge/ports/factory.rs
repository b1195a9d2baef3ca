//! Factory port that turns a registry URI into an adapter.

use super::RegistryAdapter;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Builds a registry adapter for one backend scheme.
///
/// Construction either yields a fully usable adapter or fails; there is no
/// partially configured adapter.
pub trait AdapterFactory: Send + Sync {
    /// Builds an adapter from the registry URI.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterFactoryError`] when the URI or the backend
    /// configuration cannot produce an adapter.
    fn build(&self, uri: &Url) -> Result<Box<dyn RegistryAdapter>, AdapterFactoryError>;
}

/// Errors returned by adapter factories.
#[derive(Debug, Clone, Error)]
#[error("failed to build registry adapter: {0}")]
pub struct AdapterFactoryError(Arc<dyn Error + Send + Sync>);

impl AdapterFactoryError {
    /// Wraps a backend construction failure.
    pub fn construction(err: impl Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Returns the construction error if it has type `E`.
    #[must_use]
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        let inner: &(dyn Error + Send + Sync) = &*self.0;
        inner.downcast_ref::<E>()
    }
}
