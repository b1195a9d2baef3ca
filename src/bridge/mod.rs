//! Host-facing contract for registry adapters.
//!
//! The bridge owns service discovery and the retry cadence; adapters only
//! translate lifecycle calls into backend operations. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - The factory map in [`services`]

pub mod domain;
pub mod ports;
pub mod services;
