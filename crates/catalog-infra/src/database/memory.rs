//! In-memory item repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use catalog_core::domain::{Item, ItemChanges, ItemFilter, ItemId, ItemOrder, NewItem};
use catalog_core::error::RepoError;
use catalog_core::ports::{BaseRepository, ItemRepository};

struct State {
    next_id: ItemId,
    // Keyed by id, so iteration order is insertion order.
    items: BTreeMap<ItemId, Item>,
}

/// In-memory item repository using a BTreeMap behind an async RwLock.
///
/// Ids start at 1 and are never reused, even after a delete.
/// Note: Data is lost on process restart.
pub struct InMemoryItemRepository {
    state: RwLock<State>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                next_id: 1,
                items: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Item, ItemId> for InMemoryItemRepository {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, RepoError> {
        let state = self.state.read().await;
        Ok(state.items.get(&id).cloned())
    }

    async fn delete(&self, id: ItemId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: NewItem, created_at: DateTime<Utc>) -> Result<Item, RepoError> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;

        let item = Item {
            id,
            name: item.name,
            description: item.description,
            published: item.published,
            created_at,
        };
        state.items.insert(id, item.clone());

        tracing::debug!(item_id = id, "Item inserted in memory");
        Ok(item)
    }

    async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, RepoError> {
        let state = self.state.read().await;

        let mut items: Vec<Item> = state
            .items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        drop(state);

        match filter.order {
            ItemOrder::Oldest => {}
            ItemOrder::Newest => items.reverse(),
            // String order is code point order; stable sort keeps id order among equal names.
            ItemOrder::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
        }

        let offset = usize::try_from(filter.offset).unwrap_or(usize::MAX);
        let limit = filter
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(items.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(&self, id: ItemId, changes: ItemChanges) -> Result<Option<Item>, RepoError> {
        let mut state = self.state.write().await;

        let Some(item) = state.items.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(item);

        Ok(Some(item.clone()))
    }
}
