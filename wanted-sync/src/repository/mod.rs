//! Repository Layer
//!
//! Data access abstractions and implementations.

mod http_store;
mod traits;

#[cfg(test)]
pub(crate) mod memory_store;


pub use http_store::{HttpRemoteSource, HttpWantedRepository};
pub use traits::{RemoteSource, Repository, SnapshotRepository};
