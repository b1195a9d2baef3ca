//! Unit tests for the etcd v2 adapter.
