//! Connection settings for the etcd v2 adapter.
//!
//! The registry URI supplies the seed member and the base path; TLS file
//! paths and the optional request timeout come from the environment.

use crate::etcd2::client::ClientBuildError;
use crate::etcd2::domain::BasePath;
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable naming the client certificate file.
pub const CERT_FILE_ENV: &str = "ETCD_CERT_FILE";
/// Environment variable naming the client private key file.
pub const KEY_FILE_ENV: &str = "ETCD_KEY_FILE";
/// Environment variable naming the CA certificate file.
pub const CA_CERT_FILE_ENV: &str = "ETCD_CA_CERT_FILE";
/// Environment variable holding the request timeout in whole seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "ETCD_REQUEST_TIMEOUT_SECS";

/// Read-only view of environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Optional certificate and key files used to secure the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsFiles {
    cert_file: Option<PathBuf>,
    key_file: Option<PathBuf>,
    ca_cert_file: Option<PathBuf>,
}

impl TlsFiles {
    /// Creates an empty set of TLS files, selecting plain HTTP.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            cert_file: None,
            key_file: None,
            ca_cert_file: None,
        }
    }

    /// Reads the file paths from the environment.
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn from_env(env: &impl EnvSource) -> Self {
        Self {
            cert_file: path_var(env, CERT_FILE_ENV),
            key_file: path_var(env, KEY_FILE_ENV),
            ca_cert_file: path_var(env, CA_CERT_FILE_ENV),
        }
    }

    /// Sets the CA certificate file.
    #[must_use]
    pub fn with_ca_cert_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_file = Some(path.into());
        self
    }

    /// Sets the client certificate and private key files.
    #[must_use]
    pub fn with_client_identity(
        mut self,
        cert_file: impl Into<PathBuf>,
        key_file: impl Into<PathBuf>,
    ) -> Self {
        self.cert_file = Some(cert_file.into());
        self.key_file = Some(key_file.into());
        self
    }

    /// Returns the client certificate file.
    #[must_use]
    pub fn cert_file(&self) -> Option<&Path> {
        self.cert_file.as_deref()
    }

    /// Returns the client private key file.
    #[must_use]
    pub fn key_file(&self) -> Option<&Path> {
        self.key_file.as_deref()
    }

    /// Returns the CA certificate file.
    #[must_use]
    pub fn ca_cert_file(&self) -> Option<&Path> {
        self.ca_cert_file.as_deref()
    }

    /// Resolves which transport security mode the files select.
    ///
    /// Without a CA certificate the transport is plain HTTP, even when a
    /// client certificate or key is present.
    #[must_use]
    pub fn security(&self) -> TransportSecurity<'_> {
        match (
            self.ca_cert_file.as_deref(),
            self.cert_file.as_deref(),
            self.key_file.as_deref(),
        ) {
            (None, _, _) => TransportSecurity::Plain,
            (Some(ca_cert), Some(cert), Some(key)) => TransportSecurity::Mutual { ca_cert, cert, key },
            (Some(ca_cert), _, _) => TransportSecurity::ServerVerified { ca_cert },
        }
    }
}

/// Transport security mode selected by [`TlsFiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSecurity<'a> {
    /// Plain HTTP.
    Plain,
    /// HTTPS verifying the server against a custom CA.
    ServerVerified {
        /// CA certificate file used as the only trust root.
        ca_cert: &'a Path,
    },
    /// HTTPS with a client certificate, verifying the server against a
    /// custom CA.
    Mutual {
        /// CA certificate file used as the only trust root.
        ca_cert: &'a Path,
        /// Client certificate file.
        cert: &'a Path,
        /// Client private key file.
        key: &'a Path,
    },
}

impl TransportSecurity<'_> {
    /// Returns the URL scheme for the mode.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Plain => "http",
            Self::ServerVerified { .. } | Self::Mutual { .. } => "https",
        }
    }
}

/// Everything needed to build an etcd client handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    host: String,
    base_path: BasePath,
    tls: TlsFiles,
    request_timeout: Option<Duration>,
}

impl ConnectionConfig {
    /// Creates a plain-HTTP configuration for `host[:port]` with a root
    /// base path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::MissingHost`] when `host` is blank.
    pub fn new(host: impl Into<String>) -> Result<Self, ClientBuildError> {
        let normalized = host.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ClientBuildError::MissingHost(normalized));
        }

        Ok(Self {
            host: normalized,
            base_path: BasePath::root(),
            tls: TlsFiles::none(),
            request_timeout: None,
        })
    }

    /// Builds the configuration from a registry URI and the environment.
    ///
    /// The URI host (and port) names the seed member and the decoded URI path
    /// becomes the base path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::MissingHost`] when the URI has no host or
    /// [`ClientBuildError::InvalidTimeout`] when the timeout variable is not
    /// a whole number of seconds.
    pub fn from_uri(uri: &Url, env: &impl EnvSource) -> Result<Self, ClientBuildError> {
        let host = match (uri.host_str(), uri.port()) {
            (Some(host), Some(port)) if !host.is_empty() => format!("{host}:{port}"),
            (Some(host), None) if !host.is_empty() => host.to_owned(),
            _ => return Err(ClientBuildError::MissingHost(uri.to_string())),
        };
        let decoded_path = percent_decode_str(uri.path()).decode_utf8_lossy();

        Ok(Self::new(host)?
            .with_base_path(BasePath::new(&decoded_path))
            .with_tls_files(TlsFiles::from_env(env))
            .with_request_timeout(timeout_var(env)?))
    }

    /// Sets the base path.
    #[must_use]
    pub fn with_base_path(mut self, base_path: BasePath) -> Self {
        self.base_path = base_path;
        self
    }

    /// Sets the TLS files.
    #[must_use]
    pub fn with_tls_files(mut self, tls: TlsFiles) -> Self {
        self.tls = tls;
        self
    }

    /// Sets an optional per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the seed member as `host[:port]`.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the base path.
    #[must_use]
    pub const fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Returns the TLS files.
    #[must_use]
    pub const fn tls(&self) -> &TlsFiles {
        &self.tls
    }

    /// Returns the per-request timeout, if any.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns `<scheme>://<host>` for the selected security mode.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::InvalidHost`] when the host does not form
    /// a valid URL.
    pub fn seed_url(&self) -> Result<Url, ClientBuildError> {
        let raw = format!("{}://{}", self.tls.security().scheme(), self.host);
        Url::parse(&raw).map_err(|source| ClientBuildError::InvalidHost {
            host: self.host.clone(),
            source,
        })
    }
}

fn path_var(env: &impl EnvSource, key: &str) -> Option<PathBuf> {
    env.var(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn timeout_var(env: &impl EnvSource) -> Result<Option<Duration>, ClientBuildError> {
    let Some(raw) = env
        .var(REQUEST_TIMEOUT_ENV)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
    else {
        return Ok(None);
    };

    match raw.parse::<u64>() {
        Ok(0) => Ok(None),
        Ok(seconds) => Ok(Some(Duration::from_secs(seconds))),
        Err(_) => Err(ClientBuildError::InvalidTimeout {
            variable: REQUEST_TIMEOUT_ENV,
            value: raw,
        }),
    }
}
