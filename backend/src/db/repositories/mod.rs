//! Repository implementations module.
//!
//! - `local`: In-memory implementation for tests, local development and
//!   JSON-seeded directories
pub mod local;

pub use local::{LocalRepository, SeedData};
