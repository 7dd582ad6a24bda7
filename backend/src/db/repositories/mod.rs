//! Repository implementations module.
//!
//! - `local`: In-memory implementation for the default server build, unit
//!   testing and local development
pub mod local;

pub use local::LocalRepository;
