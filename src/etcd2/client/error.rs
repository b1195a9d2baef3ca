//! Error types for building and using the etcd client.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for etcd requests.
pub type EtcdResult<T> = Result<T, EtcdError>;

/// Errors raised while building a client handle.
///
/// Any of these leaves no handle behind.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The connection URI names no host.
    #[error("connection URI '{0}' has no host")]
    MissingHost(String),

    /// The host does not form a valid URL.
    #[error("invalid etcd host '{host}': {source}")]
    InvalidHost {
        /// Host as configured.
        host: String,
        /// URL parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The timeout variable is not a whole number of seconds.
    #[error("invalid {variable} value '{value}': expected whole seconds")]
    InvalidTimeout {
        /// Environment variable name.
        variable: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A certificate or key file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        /// File path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The CA file could not be parsed as PEM certificates.
    #[error("invalid CA certificate in {}: {source}", path.display())]
    InvalidCaCertificate {
        /// CA file path.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: reqwest::Error,
    },

    /// The CA file holds no certificates.
    #[error("no PEM certificates found in CA file {}", .0.display())]
    EmptyTrustRoot(PathBuf),

    /// The client certificate and key do not form a usable identity.
    #[error("invalid client identity from {} and {}: {source}", cert.display(), key.display())]
    InvalidIdentity {
        /// Client certificate path.
        cert: PathBuf,
        /// Client private key path.
        key: PathBuf,
        /// Parse failure.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP transport could not be built.
    #[error("failed to build etcd HTTP transport: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Error document returned by etcd for failed key operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{error_code}: {message} ({cause}) [{index}]")]
pub struct EtcdApiError {
    /// etcd error code.
    pub error_code: u32,
    /// Human-readable message.
    pub message: String,
    /// Offending key or detail.
    #[serde(default)]
    pub cause: String,
    /// Cluster index at the time of the error.
    #[serde(default)]
    pub index: u64,
}

impl EtcdApiError {
    /// etcd error code for a missing key.
    pub const KEY_NOT_FOUND: u32 = 100;

    /// Returns `true` when the key did not exist.
    #[must_use]
    pub const fn is_key_not_found(&self) -> bool {
        self.error_code == Self::KEY_NOT_FOUND
    }
}

/// Errors raised by etcd requests.
#[derive(Debug, Error)]
pub enum EtcdError {
    /// etcd rejected the operation.
    #[error(transparent)]
    Api(#[from] EtcdApiError),

    /// Every known member failed at the transport level.
    #[error("etcd cluster is unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The handle knows no members to send to.
    #[error("etcd client has no members to send requests to")]
    NoMembers,

    /// A member URL cannot carry a request path.
    #[error("etcd member URL '{0}' cannot be used as a base URL")]
    InvalidMemberUrl(String),

    /// The response body could not be read.
    #[error("failed to read etcd response from {url}: {source}")]
    Body {
        /// Request URL.
        url: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not match the expected document.
    #[error("failed to decode etcd response from {url}: {source}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// etcd answered with a non-success status and no error document.
    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
        /// Response body text.
        body: String,
    },
}

impl EtcdError {
    /// Returns the etcd error document, if etcd rejected the operation.
    #[must_use]
    pub const fn api(&self) -> Option<&EtcdApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}
