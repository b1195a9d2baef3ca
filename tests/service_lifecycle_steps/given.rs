//! Given steps for service lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use crate::test_helpers::fake_etcd::{FakeCluster, closed_address};
use etcd2_registry::bridge::domain::Service;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use std::net::IpAddr;
use std::time::Duration;

#[given(r#"an etcd member serving the registry URI path "{path}""#)]
fn an_etcd_member(world: &mut LifecycleWorld, path: String) -> Result<(), eyre::Report> {
    let cluster = run_async(FakeCluster::start());
    let uri = format!("etcd2://{}{path}", cluster.host());
    world.cluster = Some(cluster);
    world.connect(&uri).wrap_err("build adapter for fake member")
}

#[given("an etcd registry URI pointing at a closed port")]
fn a_closed_port(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let uri = format!("etcd2://{}/services", closed_address());
    world
        .connect(&uri)
        .wrap_err("build adapter for closed port")
}

#[given(r#"a service "{id}" named "{name}" at "{ip}" port {port} with ttl {ttl}"#)]
fn a_service(
    world: &mut LifecycleWorld,
    id: String,
    name: String,
    ip: String,
    port: u16,
    ttl: u64,
) -> Result<(), eyre::Report> {
    let address: IpAddr = ip.parse().wrap_err("parse service IP")?;
    let service = Service::new(id, name, address, port)?.with_ttl(Duration::from_secs(ttl));
    world.service = Some(service);
    Ok(())
}

#[given("the service has been registered")]
fn service_registered(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let adapter = world.adapter()?;
    let service = world.service()?;
    run_async(adapter.register(service)).wrap_err("register service for scenario")?;
    Ok(())
}
