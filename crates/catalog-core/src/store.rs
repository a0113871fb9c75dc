//! The item store - CRUD over an [`ItemRepository`] with the model invariants enforced.

use std::sync::Arc;

use crate::domain::{Item, ItemChanges, ItemFilter, ItemId, NewItem};
use crate::error::{DomainError, RepoError};
use crate::ports::ItemRepository;

const ENTITY: &str = "Item";

/// Persistence façade for items.
///
/// Every write is validated here before it reaches the repository, and the
/// store alone decides `created_at`. Cloning is cheap.
#[derive(Clone)]
pub struct ItemStore {
    repo: Arc<dyn ItemRepository>,
}

impl ItemStore {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }

    /// Create an item. The repository assigns the id.
    pub async fn create(&self, item: NewItem) -> Result<Item, DomainError> {
        item.validate()?;
        let created_at = Item::creation_timestamp();
        Ok(self.repo.insert(item, created_at).await?)
    }

    pub async fn get(&self, id: ItemId) -> Result<Item, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            })
    }

    /// List items. Rejects a `limit` or `offset` beyond [`crate::domain::PAGE_BOUND_MAX`].
    pub async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, DomainError> {
        filter.validate()?;
        Ok(self.repo.list(filter).await?)
    }

    /// Update the mutable fields of an item. An empty change set returns the
    /// item as stored.
    pub async fn update(&self, id: ItemId, changes: ItemChanges) -> Result<Item, DomainError> {
        changes.validate()?;

        if changes.is_empty() {
            return self.get(id).await;
        }

        self.repo
            .update(id, changes)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            })
    }

    /// Permanently remove an item.
    pub async fn delete(&self, id: ItemId) -> Result<(), DomainError> {
        match self.repo.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::NotFound {
                entity_type: ENTITY,
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
