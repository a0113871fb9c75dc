//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use catalog_core::domain::{Item, ItemChanges, ItemFilter, ItemId, ItemOrder, NewItem};
use catalog_core::error::RepoError;
use catalog_core::ports::{BaseRepository, ItemRepository};

use super::entity::item::{self, Entity as ItemEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL item repository.
pub type PostgresItemRepository = PostgresBaseRepository<ItemEntity>;

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn insert(
        &self,
        new_item: NewItem,
        created_at: DateTime<Utc>,
    ) -> Result<Item, RepoError> {
        let model = item::ActiveModel {
            id: NotSet,
            name: Set(new_item.name),
            description: Set(new_item.description),
            published: Set(new_item.published),
            created_at: Set(created_at.into()),
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(item_id = model.id, "Item inserted");
        Ok(model.into())
    }

    async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, RepoError> {
        let mut query = ItemEntity::find();

        if let Some(published) = filter.published {
            query = query.filter(item::Column::Published.eq(published));
        }

        query = match filter.order {
            ItemOrder::Oldest => query.order_by_asc(item::Column::Id),
            ItemOrder::Newest => query.order_by_desc(item::Column::Id),
            // Code point order, independent of the database locale.
            ItemOrder::Name => query
                .order_by(Expr::cust(r#""items"."name" COLLATE "C""#), Order::Asc)
                .order_by_asc(item::Column::Id),
        };

        if filter.offset > 0 {
            query = query.offset(filter.offset);
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let result = query.all(&self.db).await.map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: ItemId, changes: ItemChanges) -> Result<Option<Item>, RepoError> {
        if changes.is_empty() {
            return <Self as BaseRepository<Item, ItemId>>::find_by_id(self, id).await;
        }

        // Only the touched columns are written; id and created_at stay NotSet/Unchanged.
        let mut active = item::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(published) = changes.published {
            active.published = Set(published);
        }

        match active.update(&self.db).await {
            Ok(model) => {
                tracing::debug!(item_id = model.id, "Item updated");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }
}
