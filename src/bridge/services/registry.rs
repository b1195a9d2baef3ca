//! Factory map keyed by registry URI scheme.
//!
//! The composition root registers each backend factory explicitly; nothing
//! registers itself on load.

use crate::bridge::ports::{AdapterFactory, AdapterFactoryError, RegistryAdapter};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Errors returned by [`AdapterRegistry`].
#[derive(Debug, Clone, Error)]
pub enum AdapterRegistryError {
    /// The scheme is empty after trimming.
    #[error("adapter scheme must not be empty")]
    EmptyScheme,

    /// A factory is already registered for the scheme.
    #[error("an adapter factory is already registered for scheme '{0}'")]
    DuplicateScheme(String),

    /// No factory is registered for the URI scheme.
    #[error("unrecognized registry backend: {0}")]
    UnknownScheme(String),

    /// The factory failed to build an adapter.
    #[error(transparent)]
    Factory(#[from] AdapterFactoryError),
}

/// Result type for adapter registry operations.
pub type AdapterRegistryResult<T> = Result<T, AdapterRegistryError>;

/// Registered adapter factories, looked up by URI scheme.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    factories: BTreeMap<String, Arc<dyn AdapterFactory>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory for a scheme.
    ///
    /// Schemes are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::EmptyScheme`] for a blank scheme or
    /// [`AdapterRegistryError::DuplicateScheme`] when the scheme is taken.
    pub fn register(
        &mut self,
        scheme: impl Into<String>,
        factory: impl AdapterFactory + 'static,
    ) -> AdapterRegistryResult<()> {
        let normalized = scheme.into().trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(AdapterRegistryError::EmptyScheme);
        }

        if self.factories.contains_key(&normalized) {
            return Err(AdapterRegistryError::DuplicateScheme(normalized));
        }

        debug!(scheme = %normalized, "registered adapter factory");
        self.factories.insert(normalized, Arc::new(factory));
        Ok(())
    }

    /// Returns the factory registered for a scheme.
    #[must_use]
    pub fn lookup(&self, scheme: &str) -> Option<Arc<dyn AdapterFactory>> {
        self.factories
            .get(&scheme.trim().to_ascii_lowercase())
            .cloned()
    }

    /// Returns the registered schemes in sorted order.
    #[must_use]
    pub fn schemes(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Builds an adapter using the factory registered for the URI scheme.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::UnknownScheme`] when no factory is
    /// registered, or [`AdapterRegistryError::Factory`] when construction
    /// fails.
    pub fn build(&self, uri: &Url) -> AdapterRegistryResult<Box<dyn RegistryAdapter>> {
        let factory = self
            .lookup(uri.scheme())
            .ok_or_else(|| AdapterRegistryError::UnknownScheme(uri.scheme().to_owned()))?;
        let adapter = factory.build(uri)?;
        info!(scheme = uri.scheme(), "using registry backend");
        Ok(adapter)
    }
}
