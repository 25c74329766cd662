//! Domain Layer - Core Entity Trait
//!
//! Basic contract for records kept in the local store. The store assigns
//! identifiers, so every entity has a separate draft type used for creation.

use thiserror::Error;

use crate::http::FetchError;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Payload sent to the store to create an entity (carries no id)
    type Draft: Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unexpected store shape: {0}")]
    Shape(#[from] super::snapshot::ShapeError),
    #[error("Store request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Internal error: {0}")]
    Internal(String),
}
