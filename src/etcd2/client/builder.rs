//! Builds an [`EtcdClient`] from connection settings.
//!
//! | CA cert | client cert + key | transport                                 |
//! |---------|-------------------|-------------------------------------------|
//! | no      | any               | plain HTTP                                |
//! | yes     | no                | HTTPS, server verified against the CA     |
//! | yes     | yes               | HTTPS, mutual TLS                         |
//!
//! The CA always replaces the built-in trust roots.

use super::{ClientBuildError, EtcdClient};
use crate::etcd2::config::{ConnectionConfig, TransportSecurity};
use reqwest::{Certificate, Identity};
use std::path::Path;
use tracing::{debug, info};

/// Builder for [`EtcdClient`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    config: ConnectionConfig,
}

impl ClientBuilder {
    /// Creates a builder for the given configuration.
    #[must_use]
    pub const fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Builds the client handle.
    ///
    /// TLS material is read and validated here; a failure leaves no handle.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the host is invalid, a TLS file is
    /// unreadable or malformed, or the transport cannot be built.
    pub fn build(self) -> Result<EtcdClient, ClientBuildError> {
        let seed = self.config.seed_url()?;
        let security = self.config.tls().security();

        let mut http = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = self.config.request_timeout() {
            http = http.timeout(timeout);
        }

        match security {
            TransportSecurity::Plain => {
                if self.config.tls().cert_file().is_some() || self.config.tls().key_file().is_some()
                {
                    debug!("client certificate ignored without a CA certificate");
                }
                debug!("using plain HTTP transport");
            }
            TransportSecurity::ServerVerified { ca_cert } => {
                debug!(ca_cert = %ca_cert.display(), "using TLS with custom trust root");
                http = trust_only(http, load_trust_roots(ca_cert)?).no_gzip();
            }
            TransportSecurity::Mutual { ca_cert, cert, key } => {
                debug!(
                    ca_cert = %ca_cert.display(),
                    cert = %cert.display(),
                    "using mutual TLS"
                );
                let roots = load_trust_roots(ca_cert)?;
                let identity = load_identity(cert, key)?;
                http = trust_only(http, roots).identity(identity);
            }
        }

        let transport = http.build().map_err(ClientBuildError::Transport)?;
        info!(endpoint = %seed, "etcd client ready");
        Ok(EtcdClient::new(transport, vec![seed]))
    }
}

fn trust_only(
    mut http: reqwest::ClientBuilder,
    roots: Vec<Certificate>,
) -> reqwest::ClientBuilder {
    http = http.tls_built_in_root_certs(false);
    for root in roots {
        http = http.add_root_certificate(root);
    }
    http
}

fn read_file(path: &Path) -> Result<Vec<u8>, ClientBuildError> {
    std::fs::read(path).map_err(|source| ClientBuildError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn load_trust_roots(path: &Path) -> Result<Vec<Certificate>, ClientBuildError> {
    let pem = read_file(path)?;
    let roots = Certificate::from_pem_bundle(&pem).map_err(|source| {
        ClientBuildError::InvalidCaCertificate {
            path: path.to_path_buf(),
            source,
        }
    })?;
    if roots.is_empty() {
        return Err(ClientBuildError::EmptyTrustRoot(path.to_path_buf()));
    }
    Ok(roots)
}

fn load_identity(cert: &Path, key: &Path) -> Result<Identity, ClientBuildError> {
    let mut pem = read_file(cert)?;
    pem.push(b'\n');
    pem.extend(read_file(key)?);
    Identity::from_pem(&pem).map_err(|source| ClientBuildError::InvalidIdentity {
        cert: cert.to_path_buf(),
        key: key.to_path_buf(),
        source,
    })
}
