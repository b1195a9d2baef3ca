//! Adapter factory for `etcd2://` registry URIs.

use crate::bridge::ports::{AdapterFactory, AdapterFactoryError, RegistryAdapter};
use crate::etcd2::EtcdAdapter;
use crate::etcd2::config::{ConnectionConfig, EnvSource, ProcessEnv};
use url::Url;

/// URI scheme the composition root registers [`Etcd2AdapterFactory`] under.
pub const SCHEME: &str = "etcd2";

/// Builds [`EtcdAdapter`]s from `etcd2://host[:port]/base/path` URIs.
///
/// TLS file paths are read from the environment source at build time.
#[derive(Debug, Clone)]
pub struct Etcd2AdapterFactory<E = ProcessEnv> {
    env: E,
}

impl Etcd2AdapterFactory {
    /// Creates a factory reading the process environment.
    #[must_use]
    pub const fn new() -> Self {
        Self { env: ProcessEnv }
    }
}

impl Default for Etcd2AdapterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvSource> Etcd2AdapterFactory<E> {
    /// Creates a factory reading the given environment source.
    #[must_use]
    pub const fn with_env(env: E) -> Self {
        Self { env }
    }
}

impl<E: EnvSource + Send + Sync> AdapterFactory for Etcd2AdapterFactory<E> {
    fn build(&self, uri: &Url) -> Result<Box<dyn RegistryAdapter>, AdapterFactoryError> {
        let config =
            ConnectionConfig::from_uri(uri, &self.env).map_err(AdapterFactoryError::construction)?;
        let adapter = EtcdAdapter::connect(&config).map_err(AdapterFactoryError::construction)?;
        Ok(Box::new(adapter))
    }
}
