use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Item, ItemChanges, ItemFilter, ItemId, NewItem};
use crate::error::RepoError;

/// Generic repository trait for lookups and removal by key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` when nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Item repository. Implementations persist what they are given; validation
/// happens in [`crate::ItemStore`].
#[async_trait]
pub trait ItemRepository: BaseRepository<Item, ItemId> {
    /// Insert a new item, assigning its id.
    async fn insert(&self, item: NewItem, created_at: DateTime<Utc>) -> Result<Item, RepoError>;

    /// Materialize the items matching `filter`.
    async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, RepoError>;

    /// Apply `changes` to one item. Returns `None` if no item has that id.
    async fn update(&self, id: ItemId, changes: ItemChanges) -> Result<Option<Item>, RepoError>;
}
