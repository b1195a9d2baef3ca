//! Runs one registry adapter operation against an etcd cluster.
//!
//! Usage:
//!
//! ```text
//! etcd2_probe --uri etcd2://10.0.0.1:2379/services ping
//! etcd2_probe --uri etcd2://10.0.0.1:2379/services register \
//!     --id node-1:web:8080 --name web --ip 10.0.0.7 --port 8080 --ttl 30
//! ```
//!
//! TLS material is taken from `ETCD_CA_CERT_FILE`, `ETCD_CERT_FILE` and
//! `ETCD_KEY_FILE`, exactly as the adapter does when hosted by a bridge. Log
//! verbosity follows `RUST_LOG` and defaults to `info`.

use clap::{Args, Parser, Subcommand};
use etcd2_registry::bridge::domain::Service;
use etcd2_registry::bridge::services::AdapterRegistry;
use etcd2_registry::etcd2::{Etcd2AdapterFactory, SCHEME};
use std::net::IpAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(about = "Exercise the etcd2 registry adapter once")]
struct Cli {
    /// Registry URI, e.g. `etcd2://10.0.0.1:2379/services`.
    #[arg(long, env = "REGISTRY_URI")]
    uri: Url,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the cluster answers.
    Ping,
    /// Publish a service instance.
    Register(ServiceArgs),
    /// Re-assert a service instance and its TTL.
    Refresh(ServiceArgs),
    /// Withdraw a service instance.
    Deregister(ServiceArgs),
}

#[derive(Debug, Args)]
struct ServiceArgs {
    /// Instance identifier.
    #[arg(long)]
    id: String,
    /// Service name.
    #[arg(long)]
    name: String,
    /// Instance IP address.
    #[arg(long)]
    ip: IpAddr,
    /// Instance port.
    #[arg(long)]
    port: u16,
    /// Time-to-live in seconds; 0 disables expiry.
    #[arg(long, default_value_t = 0)]
    ttl: u64,
}

impl ServiceArgs {
    fn into_service(self) -> eyre::Result<Service> {
        Ok(Service::new(self.id, self.name, self.ip, self.port)?
            .with_ttl(Duration::from_secs(self.ttl)))
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut registry = AdapterRegistry::new();
    registry.register(SCHEME, Etcd2AdapterFactory::new())?;
    let adapter = registry.build(&cli.uri)?;

    match cli.command {
        Command::Ping => {
            adapter.ping().await?;
            info!("etcd is reachable");
        }
        Command::Register(args) => {
            let service = args.into_service()?;
            adapter.register(&service).await?;
            info!(service = %service.id(), "service registered");
        }
        Command::Refresh(args) => {
            let service = args.into_service()?;
            adapter.refresh(&service).await?;
            info!(service = %service.id(), "service refreshed");
        }
        Command::Deregister(args) => {
            let service = args.into_service()?;
            adapter.deregister(&service).await?;
            info!(service = %service.id(), "service deregistered");
        }
    }
    Ok(())
}
