//! Snapshot Repository
//!
//! Whole-entity access to stored snapshots. Callers read a snapshot, change
//! it and write the complete value back; reorder operations that must not
//! race live on the concrete store instead.

use async_trait::async_trait;
use crate::domain::{DomainError, DomainResult, Entity};

#[async_trait]
pub trait Repository<T: Entity + 'static>: Send + Sync {
    /// Store a new snapshot. An ID of zero asks the store to assign one;
    /// an ID already in use is a conflict.
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Every snapshot in ascending ID order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace the stored snapshot with `entity` as a whole
    async fn update(&self, entity: &T) -> DomainResult<T>;

    async fn delete(&self, id: T::Id) -> DomainResult<()>;

    /// Like `find_by_id`, but a missing snapshot is `NotFound`
    async fn get(&self, id: T::Id) -> DomainResult<T> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("{:?} not found", id)))
    }
}
