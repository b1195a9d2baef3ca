//! Registry adapter backed by etcd v2 keys.

use crate::bridge::domain::Service;
use crate::bridge::ports::{RegistryAdapter, RegistryAdapterError, RegistryAdapterResult};
use crate::etcd2::client::{ClientBuildError, ClientBuilder, EtcdClient, EtcdResult};
use crate::etcd2::config::ConnectionConfig;
use crate::etcd2::domain::{BasePath, RegistryEntry};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Publishes service instances as etcd keys under a base path.
///
/// Every operation except [`EtcdAdapter::services`] first re-resolves cluster
/// membership, then issues a single request. Nothing is retried and nothing
/// is cached.
#[derive(Debug)]
pub struct EtcdAdapter {
    client: EtcdClient,
    base_path: BasePath,
}

impl EtcdAdapter {
    /// Creates an adapter from an existing client handle.
    #[must_use]
    pub const fn new(client: EtcdClient, base_path: BasePath) -> Self {
        Self { client, base_path }
    }

    /// Builds the client handle and the adapter from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the client cannot be built.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, ClientBuildError> {
        let client = ClientBuilder::new(config.clone()).build()?;
        Ok(Self::new(client, config.base_path().clone()))
    }

    /// Returns the client handle.
    #[must_use]
    pub const fn client(&self) -> &EtcdClient {
        &self.client
    }

    /// Returns the base path.
    #[must_use]
    pub const fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Checks that a member answers `GET /version` with a success status.
    ///
    /// # Errors
    ///
    /// Returns the request error; a failed membership refresh alone is not
    /// an error.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> EtcdResult<()> {
        self.sync_cluster().await;
        match self.client.ping().await? {
            Some(version) => debug!(
                server = %version.etcdserver,
                cluster = %version.etcdcluster,
                "etcd answered ping"
            ),
            None => debug!("etcd answered ping"),
        }
        Ok(())
    }

    /// Writes `<base>/<name>/<id> = ip:port` with the service TTL.
    ///
    /// # Errors
    ///
    /// Returns the etcd error after logging it.
    #[instrument(skip(self, service), fields(service = %service.id()))]
    pub async fn register(&self, service: &Service) -> EtcdResult<()> {
        self.sync_cluster().await;

        let entry = RegistryEntry::for_service(&self.base_path, service);
        match self
            .client
            .set(entry.key(), entry.value(), entry.ttl_seconds())
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(key = %entry.key(), error = %err, "etcd: failed to register service");
                Err(err)
            }
        }
    }

    /// Deletes `<base>/<name>/<id>`.
    ///
    /// # Errors
    ///
    /// Returns the etcd error after logging it, including "key not found"
    /// when the entry is already gone.
    #[instrument(skip(self, service), fields(service = %service.id()))]
    pub async fn deregister(&self, service: &Service) -> EtcdResult<()> {
        self.sync_cluster().await;

        let key = self.base_path.key_for(service);
        match self.client.delete(&key, false).await {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!(key = %key, error = %err, "etcd: failed to deregister service");
                Err(err)
            }
        }
    }

    /// Re-asserts the entry and its TTL; identical to
    /// [`EtcdAdapter::register`].
    ///
    /// # Errors
    ///
    /// Returns the etcd error after logging it.
    pub async fn refresh(&self, service: &Service) -> EtcdResult<()> {
        self.register(service).await
    }

    /// Always returns an empty list.
    ///
    /// Entries are not read back from etcd; callers needing the registered
    /// set must track it themselves.
    #[must_use]
    pub const fn services(&self) -> Vec<Service> {
        Vec::new()
    }

    async fn sync_cluster(&self) {
        if !self.client.sync_cluster().await {
            warn!("etcd: sync cluster was unsuccessful");
        }
    }
}

#[async_trait]
impl RegistryAdapter for EtcdAdapter {
    async fn ping(&self) -> RegistryAdapterResult<()> {
        Self::ping(self).await.map_err(RegistryAdapterError::backend)
    }

    async fn register(&self, service: &Service) -> RegistryAdapterResult<()> {
        Self::register(self, service)
            .await
            .map_err(RegistryAdapterError::backend)
    }

    async fn deregister(&self, service: &Service) -> RegistryAdapterResult<()> {
        Self::deregister(self, service)
            .await
            .map_err(RegistryAdapterError::backend)
    }

    async fn refresh(&self, service: &Service) -> RegistryAdapterResult<()> {
        Self::refresh(self, service)
            .await
            .map_err(RegistryAdapterError::backend)
    }

    async fn services(&self) -> RegistryAdapterResult<Vec<Service>> {
        Ok(Self::services(self))
    }
}
