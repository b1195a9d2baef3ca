//! Step definitions for service lifecycle BDD scenarios.

mod given;
mod then;
pub mod world;
