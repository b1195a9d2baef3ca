//! Shared world state for service lifecycle BDD scenarios.

use crate::test_helpers::fake_etcd::FakeCluster;
use etcd2_registry::bridge::domain::Service;
use etcd2_registry::bridge::ports::{RegistryAdapter, RegistryAdapterResult};
use etcd2_registry::bridge::services::AdapterRegistry;
use etcd2_registry::etcd2::{Etcd2AdapterFactory, SCHEME};
use rstest::fixture;
use std::collections::BTreeMap;
use url::Url;

/// Scenario world for service lifecycle behaviour tests.
#[derive(Default)]
pub struct LifecycleWorld {
    /// Fake etcd member, when the scenario runs one.
    pub cluster: Option<FakeCluster>,
    /// Adapter built from the registry URI.
    pub adapter: Option<Box<dyn RegistryAdapter>>,
    /// Service instance the scenario operates on.
    pub service: Option<Service>,
    /// Result of the last adapter operation.
    pub last_result: Option<RegistryAdapterResult<()>>,
    /// Result of the last `services` call.
    pub listed: Option<Vec<Service>>,
}

impl LifecycleWorld {
    /// Builds the adapter for `uri` the way a bridge composition root does.
    ///
    /// # Errors
    ///
    /// Returns an error when no adapter can be built for the URI.
    pub fn connect(&mut self, uri: &str) -> Result<(), eyre::Report> {
        let mut registry = AdapterRegistry::new();
        registry.register(SCHEME, Etcd2AdapterFactory::with_env(BTreeMap::new()))?;
        self.adapter = Some(registry.build(&Url::parse(uri)?)?);
        Ok(())
    }

    /// Returns the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error when no adapter has been built yet.
    pub fn adapter(&self) -> Result<&dyn RegistryAdapter, eyre::Report> {
        self.adapter
            .as_deref()
            .ok_or_else(|| eyre::eyre!("no adapter in scenario world"))
    }

    /// Returns the service under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no service has been declared.
    pub fn service(&self) -> Result<&Service, eyre::Report> {
        self.service
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no service in scenario world"))
    }

    /// Returns the fake etcd member.
    ///
    /// # Errors
    ///
    /// Returns an error when the scenario runs without one.
    pub fn cluster(&self) -> Result<&FakeCluster, eyre::Report> {
        self.cluster
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no etcd member in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
