use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, UpdateItem, now_millis};

/// Persistence interface for items.
///
/// Implementations assign ids and timestamps, and check every document they
/// write against the [`Item`] invariants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item built from an already validated request
    async fn create(&self, input: CreateItem) -> ItemResult<Item>;

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// All items, newest first
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Partial update; `NotFound` when absent
    async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item>;

    /// Atomically negate `completed`; `NotFound` when absent
    async fn toggle_completed(&self, id: Uuid) -> ItemResult<Item>;

    /// Remove permanently; `NotFound` when absent
    async fn delete(&self, id: Uuid) -> ItemResult<()>;

    /// Round trip to the backing store
    async fn ping(&self) -> ItemResult<()>;
}

/// In-memory implementation for development and tests
#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<Uuid, Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let item = Item::from_create(Uuid::now_v7(), input, now_millis());
        item.validate()?;

        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());

        tracing::info!(item_id = %item.id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn list(&self) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;

        let mut result: Vec<Item> = items.values().cloned().collect();
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        let existing = items
            .get(&id)
            .ok_or_else(|| ItemError::NotFound(id.to_string()))?;

        let mut updated = existing.clone();
        updated.apply_update(input);
        updated.validate()?;

        items.insert(id, updated.clone());
        tracing::info!(item_id = %id, "Updated item");
        Ok(updated)
    }

    async fn toggle_completed(&self, id: Uuid) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(&id)
            .ok_or_else(|| ItemError::NotFound(id.to_string()))?;

        item.toggle();
        tracing::info!(item_id = %id, completed = item.completed, "Toggled item");
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> ItemResult<()> {
        let mut items = self.items.write().await;
        items
            .remove(&id)
            .map(|_| tracing::info!(item_id = %id, "Deleted item"))
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    async fn ping(&self) -> ItemResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemUnit;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryItemRepository::new();

        let item = repo.create(CreateItem::named("Milk")).await.unwrap();
        assert_eq!(item.name, "Milk");

        let fetched = repo.get_by_id(item.id).await.unwrap();
        assert_eq!(fetched, Some(item));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_document() {
        let repo = InMemoryItemRepository::new();
        let input = CreateItem {
            quantity: Some(-3.0),
            ..CreateItem::named("Eggs")
        };

        let result = repo.create(input).await;
        assert!(matches!(result, Err(ItemError::Validation(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryItemRepository::new();
        let a = repo.create(CreateItem::named("A")).await.unwrap();
        let b = repo.create(CreateItem::named("B")).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(names, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryItemRepository::new();
        let result = repo.update(Uuid::now_v7(), UpdateItem::default()).await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_stored_item_on_invalid_change() {
        let repo = InMemoryItemRepository::new();
        let item = repo.create(CreateItem::named("Rice")).await.unwrap();

        let result = repo
            .update(
                item.id,
                UpdateItem {
                    quantity: Some(-1.0),
                    unit: Some(ItemUnit::Kilogram),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
        assert_eq!(repo.get_by_id(item.id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn test_toggle_and_delete() {
        let repo = InMemoryItemRepository::new();
        let item = repo.create(CreateItem::named("Tea")).await.unwrap();

        let toggled = repo.toggle_completed(item.id).await.unwrap();
        assert!(toggled.completed);
        assert!(toggled.updated_at > item.updated_at);

        repo.delete(item.id).await.unwrap();
        assert!(repo.get_by_id(item.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(item.id).await,
            Err(ItemError::NotFound(_))
        ));
        assert!(matches!(
            repo.toggle_completed(item.id).await,
            Err(ItemError::NotFound(_))
        ));
    }
}
