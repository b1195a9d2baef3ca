//! Building adapters from `etcd2://` URIs through the adapter registry.

use crate::etcd2_wire::helpers::{WEB_KEY, web_service};
use crate::test_helpers::EnvVarGuard;
use crate::test_helpers::fake_etcd::FakeCluster;
use etcd2_registry::bridge::domain::Service;
use etcd2_registry::bridge::ports::AdapterFactory;
use etcd2_registry::bridge::services::{AdapterRegistry, AdapterRegistryError};
use etcd2_registry::etcd2::client::ClientBuildError;
use etcd2_registry::etcd2::config::{
    CA_CERT_FILE_ENV, CERT_FILE_ENV, KEY_FILE_ENV, REQUEST_TIMEOUT_ENV,
};
use etcd2_registry::etcd2::{Etcd2AdapterFactory, SCHEME};
use rstest::rstest;
use std::collections::BTreeMap;
use url::Url;

const TLS_VARIABLES: [&str; 4] = [CA_CERT_FILE_ENV, CERT_FILE_ENV, KEY_FILE_ENV, REQUEST_TIMEOUT_ENV];

fn registry_with(factory: impl AdapterFactory + 'static) -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    registry.register(SCHEME, factory).expect("fresh registry");
    registry
}

fn uri(raw: &str) -> Url {
    Url::parse(raw).expect("valid registry URI")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uri_path_becomes_base_path(web_service: Service) {
    let cluster = FakeCluster::start().await;
    let registry = registry_with(Etcd2AdapterFactory::with_env(BTreeMap::new()));

    let adapter = registry
        .build(&uri(&format!("etcd2://{}/services", cluster.host())))
        .expect("adapter builds");
    adapter.register(&web_service).await.expect("register");

    assert_eq!(cluster.keys.value(WEB_KEY).as_deref(), Some("10.0.0.7:8080"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn process_environment_without_tls_selects_plain_http(web_service: Service) {
    let _guard = EnvVarGuard::cleared(&TLS_VARIABLES);
    let cluster = FakeCluster::start().await;
    let registry = registry_with(Etcd2AdapterFactory::new());

    let adapter = registry
        .build(&uri(&format!("ETCD2://{}/services/", cluster.host())))
        .expect("adapter builds");
    adapter.ping().await.expect("ping");
    adapter.register(&web_service).await.expect("register");

    assert!(cluster.keys.value(WEB_KEY).is_some());
}

#[rstest]
fn missing_ca_file_in_process_environment_fails_construction() {
    let _guard = EnvVarGuard::apply(&[
        (CA_CERT_FILE_ENV, Some("/nonexistent/etcd-ca.pem")),
        (CERT_FILE_ENV, None),
        (KEY_FILE_ENV, None),
        (REQUEST_TIMEOUT_ENV, None),
    ]);
    let registry = registry_with(Etcd2AdapterFactory::new());

    let Err(AdapterRegistryError::Factory(err)) =
        registry.build(&uri("etcd2://127.0.0.1:2379/services"))
    else {
        panic!("expected a construction failure");
    };

    assert!(matches!(
        err.downcast_ref::<ClientBuildError>(),
        Some(ClientBuildError::ReadFile { .. })
    ));
}

#[rstest]
fn malformed_timeout_fails_construction() {
    let env = BTreeMap::from([(REQUEST_TIMEOUT_ENV.to_owned(), "soon".to_owned())]);
    let registry = registry_with(Etcd2AdapterFactory::with_env(env));

    let Err(AdapterRegistryError::Factory(err)) =
        registry.build(&uri("etcd2://127.0.0.1:2379/services"))
    else {
        panic!("expected a construction failure");
    };

    assert!(matches!(
        err.downcast_ref::<ClientBuildError>(),
        Some(ClientBuildError::InvalidTimeout { .. })
    ));
}

#[rstest]
fn uri_without_host_fails_construction() {
    let registry = registry_with(Etcd2AdapterFactory::with_env(BTreeMap::new()));

    let Err(AdapterRegistryError::Factory(err)) = registry.build(&uri("etcd2:/services")) else {
        panic!("expected a construction failure");
    };

    assert!(matches!(
        err.downcast_ref::<ClientBuildError>(),
        Some(ClientBuildError::MissingHost(_))
    ));
}

#[rstest]
fn other_schemes_are_not_handled() {
    let registry = registry_with(Etcd2AdapterFactory::with_env(BTreeMap::new()));

    let result = registry.build(&uri("consul://127.0.0.1:8500"));

    assert!(matches!(result, Err(AdapterRegistryError::UnknownScheme(scheme)) if scheme == "consul"));
}
