//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations talk HTTP to the local store or keep records in memory.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{DomainResult, Entity, RemotePage, StoreSnapshot, WantedRecord};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity; the store assigns its id
    async fn create(&self, draft: &T::Draft) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: &T::Id) -> DomainResult<()>;
}

/// Extension for stores that remember when they were last synced
#[async_trait]
pub trait SnapshotRepository: Repository<WantedRecord> {
    /// Current records plus the stored sync date
    async fn snapshot(&self) -> DomainResult<StoreSnapshot>;

    /// Remember `date` as the last sync day. `previous` is the snapshot the
    /// sync started from.
    async fn record_sync_date(&self, date: NaiveDate, previous: &StoreSnapshot) -> DomainResult<()>;
}

/// Read-only access to the external source
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch one page (1-based). `None` means the page could not be fetched;
    /// the cause has already been logged.
    async fn fetch_page(&self, page: u32) -> Option<RemotePage>;
}
