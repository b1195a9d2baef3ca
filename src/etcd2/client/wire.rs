//! Response documents of the etcd v2 API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Result of a key operation (`set`, `get`, `delete`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtcdResponse {
    /// Operation etcd performed, e.g. `set` or `delete`.
    pub action: String,
    /// Node after the operation.
    #[serde(default)]
    pub node: Option<Node>,
    /// Node before the operation, when it existed.
    #[serde(default)]
    pub prev_node: Option<Node>,
}

/// A key or directory in the etcd v2 keyspace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Absolute key.
    #[serde(default)]
    pub key: String,
    /// Value; absent for directories and deletions.
    #[serde(default)]
    pub value: Option<String>,
    /// Whether the node is a directory.
    #[serde(default)]
    pub dir: bool,
    /// Absolute expiry time for keys with a TTL.
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
    /// Remaining time-to-live in seconds.
    #[serde(default)]
    pub ttl: Option<i64>,
    /// Index of the last modification.
    #[serde(default)]
    pub modified_index: u64,
    /// Index of creation.
    #[serde(default)]
    pub created_index: u64,
    /// Children of a directory node.
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// Body of `GET /version`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EtcdVersion {
    /// Server version.
    pub etcdserver: String,
    /// Cluster version.
    #[serde(default)]
    pub etcdcluster: String,
}

/// Body of `GET /v2/members`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MembersResponse {
    /// Current cluster members.
    pub members: Vec<Member>,
}

/// One cluster member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Member {
    /// Member identifier.
    #[serde(default)]
    pub id: String,
    /// Member name; empty until the member has started.
    #[serde(default)]
    pub name: String,
    /// Peer-to-peer URLs.
    #[serde(rename = "peerURLs", default)]
    pub peer_urls: Vec<String>,
    /// Client-facing URLs.
    #[serde(rename = "clientURLs", default)]
    pub client_urls: Vec<String>,
}
