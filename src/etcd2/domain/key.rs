//! Base path and registry key types.
//!
//! Keys are absolute, `/`-separated and never contain empty segments, so a
//! base path of `""`, `"/"` or `"//"` all place entries at `/<name>/<id>`.

use crate::bridge::domain::Service;
use std::fmt;

/// Key prefix under which an adapter stores its entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BasePath(String);

impl BasePath {
    /// Creates a base path, collapsing empty segments.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(join_segments(raw.split('/')))
    }

    /// Returns the root base path.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns the normalized path; the root is the empty string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the root base path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Computes `<base path>/<service name>/<service id>`.
    #[must_use]
    pub fn key_for(&self, service: &Service) -> RegistryKey {
        RegistryKey(format!(
            "{}/{}/{}",
            self.0,
            service.name().as_str(),
            service.id().as_str()
        ))
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            formatter.write_str("/")
        } else {
            formatter.write_str(&self.0)
        }
    }
}

/// Absolute etcd key of one registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryKey(String);

impl RegistryKey {
    /// Creates a key from an arbitrary path, collapsing empty segments.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let joined = join_segments(raw.split('/'));
        if joined.is_empty() {
            Self("/".to_owned())
        } else {
            Self(joined)
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the non-empty path segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

fn join_segments<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    segments
        .filter(|segment| !segment.is_empty())
        .fold(String::new(), |mut joined, segment| {
            joined.push('/');
            joined.push_str(segment);
            joined
        })
}
